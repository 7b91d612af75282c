//! Phillips-curve model variants.
//!
//! Grouping and design construction are small, pure functions so the fitting
//! code can stay generic over the four variants.

pub mod model;

pub use model::*;
