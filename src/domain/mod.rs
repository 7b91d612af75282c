//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - provider request types (`SeriesSpec`, `Frequency`, `Units`)
//! - the stage tables (`RawObservation`, `WideTable`, `IndicatorRow`, `ZScoreRow`)
//! - standardization and regression outputs (`BaselineParams`, `RegressionResult`)
//! - run configuration (`RunConfig`)

pub mod types;

pub use types::*;
