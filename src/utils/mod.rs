//! Utility functions for DSP operations

mod clamp;
mod conv;
mod math;

pub use clamp::{clamp_i16, interleave_i16};
pub use conv::{convolve_same, correlate_full};
pub use math::*;
