//! CLI command implementations

pub mod completions;
pub mod import;
pub mod list;
pub mod shell;
pub mod stats;
pub mod template;

use console::style;
use std::path::Path;

use crate::core::Inventory;
use crate::exchange::{self, ExchangeError, ImportMode};

/// Load a CSV file into a fresh inventory.
///
/// A file whose header is valid but holds no valid rows yields an empty
/// inventory; every other failure is returned as-is.
pub(crate) fn load_inventory(path: &Path, quiet: bool) -> Result<Inventory, ExchangeError> {
    let mut inventory = Inventory::new();
    match exchange::import(&mut inventory, path, |_| ImportMode::Overwrite) {
        Ok(report) => {
            if report.invalid_rows > 0 && !quiet {
                eprintln!(
                    "{} {} invalid row(s) skipped in {}",
                    style("!").yellow(),
                    report.invalid_rows,
                    path.display()
                );
            }
            Ok(inventory)
        }
        Err(ExchangeError::NoValidProducts { invalid_rows }) => {
            if invalid_rows > 0 && !quiet {
                eprintln!(
                    "{} {} invalid row(s) skipped in {}",
                    style("!").yellow(),
                    invalid_rows,
                    path.display()
                );
            }
            Ok(inventory)
        }
        Err(e) => Err(e),
    }
}
