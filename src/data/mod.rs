//! Data acquisition and reshaping.
//!
//! - FRED client (`fred`)
//! - long → wide assembler (`wide`)
//! - seeded synthetic panel (`sample`)

pub mod fred;
pub mod sample;
pub mod wide;

pub use fred::*;
pub use sample::*;
pub use wide::*;
