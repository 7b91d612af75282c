//! `labor-tightness` library crate.
//!
//! The binary (`tight`) is a thin wrapper around this library so that:
//!
//! - every pipeline stage is testable without spawning processes or hitting FRED
//! - stages stay independent: each consumes one immutable table and returns the next
//!
//! Pipeline: `data` (fetch + wide table) -> `indicators` (derive + standardize)
//! -> `fit` (Phillips-curve regressions) -> `report` / `plot` / `io`.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod indicators;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
