//! Demodulation benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qam_modem::*;

fn impaired_capture(config: &ModemConfig) -> Vec<num_complex::Complex64> {
    let tx_config = ModemConfig {
        buffer_len: config.buffer_len + 1000,
        ..config.clone()
    };
    let tx = Transmitter::new(tx_config).unwrap();
    let buffer = tx.modulate("Hello World!").unwrap();

    let impairments = ImpairmentConfig {
        frequency_offset: 2000.0,
        phase: 0.2,
        delay: 1000,
        snr_db: Some(20.0),
        seed: 7,
        ..ImpairmentConfig::default()
    };
    Channel::new(impairments, config.sample_rate).apply(&buffer)
}

fn benchmark_receive(c: &mut Criterion) {
    let config = ModemConfig::default();
    let samples = impaired_capture(&config);
    let mut rx = Receiver::new(config).unwrap();

    c.bench_function("qam4_2_receive_16384_samples", |b| {
        b.iter(|| black_box(rx.receive(black_box(&samples))))
    });
}

fn benchmark_costas(c: &mut Criterion) {
    let config = ModemConfig::default();
    let samples: Vec<f64> = impaired_capture(&config).iter().map(|s| s.re).collect();
    let mut costas =
        CostasLoop::new(&config.costas, config.carrier_freq, config.sample_rate).unwrap();

    c.bench_function("costas_loop_16384_samples", |b| {
        b.iter(|| {
            costas.reset();
            black_box(costas.process(black_box(&samples)))
        })
    });
}

criterion_group!(benches, benchmark_receive, benchmark_costas);
criterion_main!(benches);
