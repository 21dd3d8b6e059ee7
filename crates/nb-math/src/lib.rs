//! nbayes math utilities.

pub mod math;

pub use math::stable::*;
