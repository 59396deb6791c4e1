//! Core DSP traits for the modem
//!
//! These traits define mathematical behavior, not framing.
//! Each trait represents one orthogonal axis of modem configuration.

mod carrier;
mod constellation;
mod pulse_shape;

pub use carrier::Carrier;
pub use constellation::Constellation;
pub use pulse_shape::PulseShape;
