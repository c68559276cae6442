//! CSV exchange - saving and loading inventories as `name,price,quantity`

pub mod common;
pub mod error;
pub mod export;
pub mod import;

pub use common::{template, EXPECTED_HEADER};
pub use error::ExchangeError;
pub use export::{export, ExportOptions, ExportOutcome};
pub use import::{import, stage, ImportMode, ImportReport, StagedImport};
