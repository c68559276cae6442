//! Shared helper functions for CLI commands
//!
//! Formatting used by the shell, the listing table and the statistics view.

use crate::core::Product;

/// Format a price or value with two decimals
pub fn format_money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format an optional value, showing "N/A" when absent
pub fn format_optional<T, F>(value: Option<T>, fmt: F) -> String
where
    F: FnOnce(T) -> String,
{
    value.map(fmt).unwrap_or_else(|| "N/A".to_string())
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// One-line product summary
pub fn product_line(product: &Product) -> String {
    format!(
        "Name: {} | Unit Price: {} | Stock Quantity: {} | Total Stock Value: {}",
        product.name,
        format_money(product.price),
        product.quantity,
        format_money(product.total_cost())
    )
}

/// Product summary with a heading, numbered when `index` is given
pub fn product_card(product: &Product, index: Option<usize>) -> String {
    let header = match index {
        Some(i) => format!("Product {}:", i),
        None => "Product:".to_string(),
    };
    format!("{}\n{}", header, product_line(product))
}
