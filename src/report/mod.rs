//! Reporting utilities: run header and the adjusted R² table.

pub mod format;

pub use format::*;
