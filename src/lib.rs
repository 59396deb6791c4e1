//! QAM Modem - Text modem core for software-defined radio links
//!
//! The transmit side frames text behind Barker headers, maps it onto a
//! QAM4_2 (or 4QAM / 4PAM) alphabet and pulse-shapes it into a cyclic
//! complex baseband buffer. The receive side undoes carrier offset,
//! phase and symbol timing on a captured buffer, finds the headers and
//! reassembles the message. Radio I/O stays outside this crate.

pub mod carriers;
pub mod channel;
pub mod config;
pub mod constellations;
pub mod error;
pub mod filters;
pub mod framing;
pub mod modem;
pub mod pulse_shapes;
pub mod timing;
pub mod traits;
mod utils;

// Re-export core types for convenience
pub use carriers::{CostasLoop, Nco};
pub use channel::{Channel, ImpairmentConfig};
pub use config::{CostasConfig, ModemConfig, TimingConfig};
pub use constellations::{ModulationType, Pam4, PamLevel, Qam4, Qam4_2};
pub use error::{ModemError, ModemResult};
pub use framing::{BarkerCode, Reassembler, SyncEvent, TxFrames};
pub use modem::{Receiver, RxOutcome, Transmitter};
pub use pulse_shapes::SquareRootRaisedCosine;
pub use timing::TimingRecovery;
pub use traits::{Carrier, Constellation, PulseShape};
pub use utils::interleave_i16;
