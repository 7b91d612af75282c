//! Error types.
//!
//! Two layers:
//!
//! - [`AppError`] aborts the run. It carries the process exit code so `main`
//!   can surface it verbatim (2 = usage/config, 3 = data, 4 = fetch/output I/O).
//! - [`FitError`] describes why a single (indicator, variant) regression could
//!   not be estimated. It is recorded in the results table and never aborts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exit code for configuration and usage errors.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for data errors (empty windows, degenerate baselines).
pub const EXIT_DATA: u8 = 3;
/// Exit code for provider and output I/O failures.
pub const EXIT_IO: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(EXIT_CONFIG, message)
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::new(EXIT_DATA, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(EXIT_IO, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Why a single regression could not be estimated.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FitError {
    #[error("insufficient observations: n={n}, need at least {required}")]
    InsufficientObservations { n: usize, required: usize },

    #[error("target has zero variance over {n} observations")]
    ZeroVariance { n: usize },

    #[error("least-squares solve failed (singular design)")]
    Singular,
}
