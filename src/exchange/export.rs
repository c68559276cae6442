//! Save an inventory to CSV

use serde::Serialize;
use std::path::Path;

use crate::core::inventory::Inventory;
use crate::exchange::error::ExchangeError;

/// Options for [`export`]
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Write the `name,price,quantity` header row
    pub include_header: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_header: true,
        }
    }
}

/// What [`export`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// File written with this many product rows
    Written { rows: usize },
    /// Inventory was empty; the destination was not touched
    NothingToSave,
}

/// One CSV line; field order defines the header
#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    price: f64,
    quantity: i64,
}

/// Write every product to `path` in collection order.
///
/// An empty inventory is a no-op. The inventory itself is never modified.
pub fn export(
    inventory: &Inventory,
    path: &Path,
    options: ExportOptions,
) -> Result<ExportOutcome, ExchangeError> {
    if inventory.is_empty() {
        log::info!("inventory is empty, not writing {}", path.display());
        return Ok(ExportOutcome::NothingToSave);
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(options.include_header)
        .from_path(path)
        .map_err(|e| ExchangeError::from_csv(path, e))?;

    for product in inventory.products() {
        wtr.serialize(CsvRow {
            name: &product.name,
            price: product.price,
            quantity: product.quantity,
        })
        .map_err(|e| ExchangeError::from_csv(path, e))?;
    }
    wtr.flush().map_err(|e| ExchangeError::from_io(path, e))?;

    log::info!("wrote {} product(s) to {}", inventory.len(), path.display());
    Ok(ExportOutcome::Written {
        rows: inventory.len(),
    })
}
