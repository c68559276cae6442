//! Load products from CSV and reconcile them with the current inventory
//!
//! Import runs in two phases. [`stage`] reads and validates the file into a
//! [`StagedImport`] without touching any inventory; structural problems
//! (unreadable file, empty file, bad header, no valid rows) abort here.
//! [`StagedImport::apply`] then overwrites or merges, which cannot fail.
//! The caller picks the [`ImportMode`] in between, typically by asking.

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::core::inventory::Inventory;
use crate::core::product::{normalize_name, parse_decimal, parse_integer, Product, ValidationError};
use crate::exchange::common::{header_matches, is_blank_row, EXPECTED_HEADER};
use crate::exchange::error::ExchangeError;

/// How staged products are reconciled with the current inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Discard the current inventory and keep only the imported products
    Overwrite,
    /// Add quantities to products with the same name, take the imported
    /// price, append the rest
    Merge,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Overwrite => write!(f, "overwrite"),
            ImportMode::Merge => write!(f, "merge"),
        }
    }
}

/// Validated rows read from a CSV file, not yet applied
#[derive(Debug, Clone)]
pub struct StagedImport {
    path: PathBuf,
    products: Vec<Product>,
    invalid_rows: usize,
}

/// Summary of a completed import
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub path: PathBuf,
    /// Valid rows read from the file
    pub loaded: usize,
    /// Rows skipped for a wrong column count or a bad field
    pub invalid_rows: usize,
    pub mode: ImportMode,
    /// Merge only: staged rows folded into an existing product
    pub merged: usize,
    /// Products appended (every staged row on overwrite)
    pub added: usize,
}

/// Why a data row was counted as invalid
#[derive(Debug)]
enum RowRejection {
    ColumnCount(usize),
    EmptyName,
    Field(ValidationError),
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::ColumnCount(n) => {
                write!(f, "expected {} columns, found {}", EXPECTED_HEADER.len(), n)
            }
            RowRejection::EmptyName => write!(f, "product name is empty"),
            RowRejection::Field(e) => write!(f, "{}", e),
        }
    }
}

impl From<ValidationError> for RowRejection {
    fn from(e: ValidationError) -> Self {
        RowRejection::Field(e)
    }
}

/// Read and validate `path` without touching any inventory
pub fn stage(path: &Path) -> Result<StagedImport, ExchangeError> {
    let file = File::open(path).map_err(|e| ExchangeError::from_io(path, e))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut records = rdr.records();

    let headers = match records.next() {
        None => {
            return Err(ExchangeError::EmptyFile {
                path: path.to_path_buf(),
            })
        }
        Some(result) => result.map_err(|e| ExchangeError::from_csv(path, e))?,
    };

    if !header_matches(&headers) {
        return Err(ExchangeError::InvalidHeader {
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut products = Vec::new();
    let mut invalid_rows = 0;

    for (row_idx, result) in records.enumerate() {
        let row_num = row_idx + 2;
        let record = result.map_err(|e| ExchangeError::from_csv(path, e))?;

        if is_blank_row(&record) {
            continue;
        }

        match parse_row(&record) {
            Ok(product) => products.push(product),
            Err(reason) => {
                log::debug!("{}: row {} skipped: {}", path.display(), row_num, reason);
                invalid_rows += 1;
            }
        }
    }

    if products.is_empty() {
        return Err(ExchangeError::NoValidProducts { invalid_rows });
    }

    log::info!(
        "staged {} product(s) from {} ({} invalid row(s))",
        products.len(),
        path.display(),
        invalid_rows
    );

    Ok(StagedImport {
        path: path.to_path_buf(),
        products,
        invalid_rows,
    })
}

/// Validate one data row into a candidate product.
///
/// Zero price and zero quantity are accepted here; only negatives are
/// rejected.
fn parse_row(record: &StringRecord) -> Result<Product, RowRejection> {
    if record.len() != EXPECTED_HEADER.len() {
        return Err(RowRejection::ColumnCount(record.len()));
    }

    let name = normalize_name(&record[0]);
    if name.is_empty() {
        return Err(RowRejection::EmptyName);
    }

    let price = parse_decimal(&record[1])?;
    let quantity = parse_integer(&record[2])?;

    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: "price",
            value: price.to_string(),
        }
        .into());
    }
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity",
            value: quantity.to_string(),
        }
        .into());
    }

    Ok(Product::new(name, price, quantity))
}

impl StagedImport {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn loaded(&self) -> usize {
        self.products.len()
    }

    pub fn invalid_rows(&self) -> usize {
        self.invalid_rows
    }

    /// Reconcile the staged products into `inventory`.
    ///
    /// Every product in the resulting inventory has a fresh `total_cost`.
    pub fn apply(self, inventory: &mut Inventory, mode: ImportMode) -> ImportReport {
        let loaded = self.products.len();
        let mut merged = 0;
        let mut added = 0;

        let result = match mode {
            ImportMode::Overwrite => {
                added = loaded;
                Inventory::from_products(self.products)
            }
            ImportMode::Merge => {
                let mut working = inventory.clone();
                for candidate in self.products {
                    match working.find_by_name_mut(&candidate.name) {
                        Some(existing) => {
                            existing.quantity = existing.quantity.saturating_add(candidate.quantity);
                            if existing.price != candidate.price {
                                existing.price = candidate.price;
                            }
                            existing.recalc_total_cost();
                            merged += 1;
                        }
                        None => {
                            working.push(candidate);
                            added += 1;
                        }
                    }
                }
                working.recalc_all();
                working
            }
        };

        *inventory = result;

        log::info!(
            "import from {} applied ({}): {} merged, {} added",
            self.path.display(),
            mode,
            merged,
            added
        );

        ImportReport {
            path: self.path,
            loaded,
            invalid_rows: self.invalid_rows,
            mode,
            merged,
            added,
        }
    }
}

/// Stage `path` and apply it with the mode returned by `choose_mode`.
///
/// `choose_mode` is only called once the file has produced at least one
/// valid product. On any error `inventory` is left unchanged.
pub fn import<F>(
    inventory: &mut Inventory,
    path: &Path,
    choose_mode: F,
) -> Result<ImportReport, ExchangeError>
where
    F: FnOnce(&StagedImport) -> ImportMode,
{
    let staged = stage(path)?;
    let mode = choose_mode(&staged);
    Ok(staged.apply(inventory, mode))
}
