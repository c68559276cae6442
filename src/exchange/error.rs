//! Errors raised while reading or writing inventory CSV files

use miette::Diagnostic;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::exchange::common::EXPECTED_HEADER;

#[derive(Debug, Error, Diagnostic)]
pub enum ExchangeError {
    #[error("The specified file was not found: {}", path.display())]
    #[diagnostic(code(invtrack::csv::not_found))]
    NotFound { path: PathBuf },

    #[error("Could not access {} due to permission issues.", path.display())]
    #[diagnostic(code(invtrack::csv::permission_denied))]
    PermissionDenied { path: PathBuf },

    #[error("Encoding error in {}. Make sure it is a valid UTF-8 CSV file.", path.display())]
    #[diagnostic(code(invtrack::csv::decode))]
    Decode { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    #[diagnostic(code(invtrack::csv::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error in {}: {message}", path.display())]
    #[diagnostic(code(invtrack::csv::malformed))]
    Csv { path: PathBuf, message: String },

    #[error("The CSV file {} is empty.", path.display())]
    #[diagnostic(code(invtrack::csv::empty_file))]
    EmptyFile { path: PathBuf },

    #[error("Invalid header [{found}]. Expected: {}.", EXPECTED_HEADER.join(","))]
    #[diagnostic(
        code(invtrack::csv::invalid_header),
        help("Generate a valid file layout with `invtrack template`")
    )]
    InvalidHeader { found: String },

    #[error("No valid products found in the CSV file ({invalid_rows} invalid row(s) skipped).")]
    #[diagnostic(code(invtrack::csv::no_valid_products))]
    NoValidProducts { invalid_rows: usize },
}

impl ExchangeError {
    /// Classify an I/O error for `path` by kind
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => ExchangeError::NotFound { path },
            io::ErrorKind::PermissionDenied => ExchangeError::PermissionDenied { path },
            io::ErrorKind::InvalidData => ExchangeError::Decode { path },
            _ => ExchangeError::Io { path, source: err },
        }
    }

    /// Classify a csv crate error for `path`
    pub fn from_csv(path: &Path, err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Self::from_io(path, e),
            csv::ErrorKind::Utf8 { .. } => ExchangeError::Decode {
                path: path.to_path_buf(),
            },
            other => ExchangeError::Csv {
                path: path.to_path_buf(),
                message: format!("{:?}", other),
            },
        }
    }
}
