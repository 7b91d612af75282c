//! Regression orchestration.
//!
//! Responsibilities:
//!
//! - fit a single (indicator, variant) model (`fitter`)
//! - map the four variants over every tightness indicator (`engine`)

pub mod engine;
pub mod fitter;

pub use engine::*;
pub use fitter::*;
