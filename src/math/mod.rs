//! Mathematical utilities: least squares, summary statistics and lags.

pub mod lag;
pub mod ols;
pub mod stats;

pub use lag::*;
pub use ols::*;
pub use stats::*;
