//! End-to-end tests for the TX and RX chains
//!
//! Each part checks a longer slice of the chain than the one before:
//! symbols only, then waveforms, then waveforms through a noisy channel.

use super::*;
use crate::channel::{Channel, ImpairmentConfig, NoiseGenerator};
use crate::config::ModemConfig;
use crate::constellations::{text_to_symbols, ModulationType};
use crate::framing::{build_frames, extract_frames, frame_text, reassemble, Correlator};
use num_complex::Complex64;
use crate::error::ModemError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FOX: &str = "The quick brown fox jumps over the lazy dog";

/// Correlate, extract and reassemble an ideal symbol stream
fn decode_symbols(symbols: &[Complex64], config: &ModemConfig) -> Option<String> {
    let events = Correlator::new(config).correlate(symbols).ok()?;
    reassemble(&extract_frames(symbols, &events, config), false)
}

/// TX buffer for `text` pushed through `impairments`, 16384 samples long
fn capture(text: &str, config: &ModemConfig, impairments: ImpairmentConfig) -> Vec<Complex64> {
    let tx_config = ModemConfig {
        buffer_len: 16384 + impairments.delay,
        ..config.clone()
    };
    let tx = Transmitter::new(tx_config).unwrap();
    let buffer = tx.modulate(text).unwrap();
    Channel::new(impairments, config.sample_rate).apply(&buffer)
}

// =============================================================================
// PART 1: Symbol-level chain
// =============================================================================

#[cfg(test)]
mod symbol_chain_tests {
    use super::*;

    #[test]
    fn test_hello_world_single_frame() {
        let config = ModemConfig::default();
        let frames = build_frames("Hello World!", &config).unwrap();
        assert_eq!(frames.symbols.len(), 365);

        let events = Correlator::new(&config).correlate(&frames.symbols).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].real.index, 12);

        assert_eq!(
            decode_symbols(&frames.symbols, &config).as_deref(),
            Some("Hello World!")
        );
    }

    #[test]
    fn test_multi_frame_message() {
        let config = ModemConfig {
            chunk_len: 16,
            ..ModemConfig::default()
        };
        let frames = build_frames(FOX, &config).unwrap();
        assert_eq!(frames.frame_count, 3);
        assert_eq!(frames.frame_len, 109);
        assert_eq!(decode_symbols(&frames.symbols, &config).as_deref(), Some(FOX));
    }

    #[test]
    fn test_frames_received_out_of_order() {
        let config = ModemConfig {
            chunk_len: 16,
            ..ModemConfig::default()
        };
        let frames = build_frames(FOX, &config).unwrap();
        let f: Vec<&[Complex64]> = frames.symbols.chunks(frames.frame_len).collect();
        let shuffled = [f[2], f[0], f[1]].concat();
        assert_eq!(decode_symbols(&shuffled, &config).as_deref(), Some(FOX));
    }

    #[test]
    fn test_filler_only_frame_is_ignored() {
        let config = ModemConfig {
            chunk_len: 16,
            ..ModemConfig::default()
        };
        let frames = build_frames(FOX, &config).unwrap();
        let f: Vec<&[Complex64]> = frames.symbols.chunks(frames.frame_len).collect();

        let mut garbage = frames.header.clone();
        garbage.extend(text_to_symbols(&frame_text(0x5A, "", 16), config.modulation).unwrap());

        let stream = [f[0], garbage.as_slice(), f[1], f[2]].concat();
        assert_eq!(decode_symbols(&stream, &config).as_deref(), Some(FOX));
    }

    #[test]
    fn test_repeated_buffer_decodes_once() {
        let config = ModemConfig {
            chunk_len: 16,
            ..ModemConfig::default()
        };
        let frames = build_frames(FOX, &config).unwrap();
        let twice = [frames.symbols.as_slice(), frames.symbols.as_slice()].concat();
        assert_eq!(decode_symbols(&twice, &config).as_deref(), Some(FOX));
    }

    /// Printable ASCII, with `X` weighted up so stray markers show up
    fn random_message(rng: &mut ChaCha8Rng) -> String {
        let len = rng.gen_range(1..=200);
        (0..len)
            .map(|_| {
                if rng.gen_bool(0.01) {
                    'X'
                } else {
                    rng.gen_range(0x20u8..=0x7E) as char
                }
            })
            .collect()
    }

    #[test]
    fn test_random_messages_roundtrip() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut sent = 0;

        for _ in 0..300 {
            let text = random_message(&mut rng);
            let config = ModemConfig {
                chunk_len: rng.gen_range(3..=90),
                ..ModemConfig::default()
            };

            let frames = match build_frames(&text, &config) {
                Ok(frames) => frames,
                Err(ModemError::StrayIdMarker { .. }) => {
                    assert!(text.contains('X'), "{:?} rejected without an X", text);
                    continue;
                }
                Err(ModemError::FillerChunk { .. }) => continue,
                Err(err) => panic!("{:?} failed to build: {}", text, err),
            };
            sent += 1;

            let events = Correlator::new(&config).correlate(&frames.symbols).unwrap();
            assert_eq!(
                events.len(),
                frames.frame_count,
                "{:?} with chunk_len {}: {:?}",
                text,
                config.chunk_len,
                events
            );
            assert_eq!(
                decode_symbols(&frames.symbols, &config).as_deref(),
                Some(text.as_str()),
                "chunk_len {}",
                config.chunk_len
            );
        }
        assert!(sent > 250, "only {} of 300 messages were framable", sent);
    }

    #[test]
    fn test_4qam_with_matched_trigger() {
        for chunk_len in [80, 16, 7, 5] {
            let config = ModemConfig {
                chunk_len,
                ..ModemConfig::for_modulation(ModulationType::Qam4)
            };
            let frames = build_frames(FOX, &config).unwrap();
            assert_eq!(
                decode_symbols(&frames.symbols, &config).as_deref(),
                Some(FOX),
                "4QAM failed with chunk_len {}",
                chunk_len
            );
        }
    }

    #[test]
    fn test_4pam_real_axis_only() {
        for chunk_len in [80, 16] {
            let config = ModemConfig {
                chunk_len,
                ..ModemConfig::for_modulation(ModulationType::Pam4)
            };
            let frames = build_frames(FOX, &config).unwrap();
            assert_eq!(decode_symbols(&frames.symbols, &config).as_deref(), Some(FOX));
        }
    }
}

// =============================================================================
// PART 2: Waveform chain
// =============================================================================

#[cfg(test)]
mod waveform_tests {
    use super::*;

    #[test]
    fn test_clean_loopback() {
        let config = ModemConfig::default();
        let rx_samples = capture("Hello World!", &config, ImpairmentConfig::default());
        let mut rx = Receiver::new(config).unwrap();
        let outcome = rx.process(&rx_samples).unwrap();

        assert!(outcome.coarse_offset.abs() < 1.0, "offset {}", outcome.coarse_offset);
        assert_eq!(outcome.message.as_deref(), Some("Hello World!"));
        let hits: Vec<usize> = outcome.events.iter().map(|e| e.real.index).collect();
        assert_eq!(hits, vec![365, 730]);
        assert_eq!(outcome.threshold_ring.len(), THRESHOLD_RING_POINTS);
    }

    #[test]
    fn test_phase_frequency_and_delay() {
        let config = ModemConfig::default();
        let impairments = ImpairmentConfig {
            frequency_offset: 2000.0,
            phase: 0.2,
            delay: 1000,
            ..ImpairmentConfig::default()
        };
        let rx_samples = capture("Hello World!", &config, impairments);
        assert_eq!(rx_samples.len(), 16384);

        let mut rx = Receiver::new(config).unwrap();
        let outcome = rx.process(&rx_samples).unwrap();

        // FFT bin spacing after the /4 is fs / N / 4 ≈ 153 Hz
        assert!(
            (outcome.coarse_offset - 2000.0).abs() < 160.0,
            "coarse offset {}",
            outcome.coarse_offset
        );
        assert!((-std::f64::consts::PI..std::f64::consts::PI).contains(&outcome.final_phase));
        assert_eq!(outcome.message.as_deref(), Some("Hello World!"));
        assert!(outcome.extracted.contains("0X00Hello World!0X00"), "{}", outcome.extracted);
    }

    #[test]
    fn test_multi_frame_waveform() {
        let config = ModemConfig {
            chunk_len: 16,
            ..ModemConfig::default()
        };
        let impairments = ImpairmentConfig {
            frequency_offset: -1500.0,
            phase: -0.5,
            delay: 333,
            ..ImpairmentConfig::default()
        };
        let rx_samples = capture(FOX, &config, impairments);
        let mut rx = Receiver::new(config).unwrap();
        assert_eq!(rx.receive(&rx_samples).as_deref(), Some(FOX));
    }

    #[test]
    fn test_dac_words_loopback() {
        let config = ModemConfig::default();
        let tx = Transmitter::new(config.clone()).unwrap();
        let dac = tx.modulate_dac("Hello World!").unwrap();
        assert_eq!(dac.len(), 2 * config.buffer_len);

        let mut rx = Receiver::new(config).unwrap();
        assert_eq!(rx.receive_raw(&dac).as_deref(), Some("Hello World!"));
    }
}

// =============================================================================
// PART 3: Impairments
// =============================================================================

#[cfg(test)]
mod impairment_tests {
    use super::*;

    #[test]
    fn test_awgn_at_18_db() {
        let config = ModemConfig::default();
        for seed in 1..=3u64 {
            let impairments = ImpairmentConfig {
                frequency_offset: 2000.0,
                phase: 0.2,
                delay: 1000,
                snr_db: Some(18.0),
                seed,
                ..ImpairmentConfig::default()
            };
            let rx_samples = capture("Hello World!", &config, impairments);
            let mut rx = Receiver::new(config.clone()).unwrap();
            assert_eq!(
                rx.receive(&rx_samples).as_deref(),
                Some("Hello World!"),
                "seed {}",
                seed
            );
        }
    }

    #[test]
    fn test_noise_only_gives_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut noise = NoiseGenerator::new(1.0, &mut rng);
        let samples: Vec<Complex64> = (0..16384).map(|_| noise.next_complex()).collect();

        let mut rx = Receiver::new(ModemConfig::default()).unwrap();
        assert_eq!(rx.receive(&samples), None);
    }

    #[test]
    fn test_receiver_is_reusable() {
        let config = ModemConfig::default();
        let rx_samples = capture("Hello World!", &config, ImpairmentConfig::default());
        let mut rx = Receiver::new(config).unwrap();
        let first = rx.receive(&rx_samples);
        let second = rx.receive(&rx_samples);
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("Hello World!"));
    }
}
