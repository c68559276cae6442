//! Common utilities for CSV exchange

use csv::StringRecord;

/// Required header, compared after trimming and lowercasing each column
pub const EXPECTED_HEADER: [&str; 3] = ["name", "price", "quantity"];

/// Example row printed by the template command
pub const EXAMPLE_ROW: [&str; 3] = ["Widget", "2.5", "10"];

const BOM: char = '\u{feff}';

/// Normalize header cells: strip a byte order mark, trim, lowercase
pub fn normalize_header(headers: &StringRecord) -> Vec<String> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { h.trim_start_matches(BOM) } else { h };
            h.trim().to_lowercase()
        })
        .collect()
}

/// Whether a header row matches [`EXPECTED_HEADER`] exactly (order included)
pub fn header_matches(headers: &StringRecord) -> bool {
    normalize_header(headers) == EXPECTED_HEADER
}

/// A row with no fields, or only blank fields, is skipped silently
pub fn is_blank_row(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// Header plus example row, ready to print or redirect to a file
pub fn template() -> String {
    format!("{}\n{}\n", EXPECTED_HEADER.join(","), EXAMPLE_ROW.join(","))
}
