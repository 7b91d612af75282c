//! Input/output helpers.
//!
//! - observation CSV ingest + validation (`ingest`)
//! - CSV exports (`export`)
//! - run summary JSON read/write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
