//! Burst detection math utilities.

pub mod math;

pub use math::exponential::*;
pub use math::geometric::*;
pub use math::select::*;
