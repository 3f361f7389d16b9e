//! Helpers that sit beside the chart core rather than inside it.

pub mod moving_average;

pub use moving_average::simple_moving_average;
