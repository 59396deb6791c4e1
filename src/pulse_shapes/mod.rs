//! Pulse shaping filter implementations
//!
//! Square-root raised cosine kernels and the fractional-delay
//! interpolator built on them.

mod interpolate;
mod srrc;

pub use interpolate::interpolate;
pub use srrc::{srrc_kernel, SquareRootRaisedCosine};
