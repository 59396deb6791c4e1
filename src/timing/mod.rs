//! Symbol timing recovery
//!
//! Output-power maximization over the fractional-delay interpolator.
//! Real and imaginary axes run as independent loops.

mod recovery;

pub use recovery::{TimingOutput, TimingRecovery};
