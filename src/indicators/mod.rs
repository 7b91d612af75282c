//! Indicator derivation and baseline standardization.

pub mod derive;
pub mod standardize;

pub use derive::*;
pub use standardize::*;
