pub mod chart;
pub mod compare;
pub mod sweep;

pub use chart::ChartCommand;
pub use compare::CompareCommand;
pub use sweep::SweepCommand;
