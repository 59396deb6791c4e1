//! Carrier generation and recovery
//!
//! NCO for frequency shifts, the 4th-power coarse offset estimator
//! and the four-branch Costas loop for fine phase tracking.

mod coarse;
mod costas;
mod nco;

pub use coarse::{coarse_frequency, estimate_offset};
pub use costas::{CostasLoop, CostasOutput};
pub use nco::{mix, Nco};
