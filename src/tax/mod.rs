pub mod brackets;
pub mod regime;
pub mod sweep;

pub use regime::{Comparison, RateConfig, RegimeResult};
pub use sweep::{break_even, sweep, ComparisonRow, SweepRange};
