//! Product record and field validation
//!
//! A [`Product`] is the only record the inventory holds. Its `total_cost`
//! is derived from `price * quantity` and can only be refreshed through
//! [`Product::recalc_total_cost`]; there is no setter for it.

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// A single inventory line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    total_cost: f64,
}

impl Product {
    /// Build a product, deriving `total_cost` from price and quantity.
    ///
    /// No validation happens here; callers go through the validators
    /// below (interactive entry) or the import row checks (CSV).
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        let mut product = Self {
            name: name.into(),
            price,
            quantity,
            total_cost: 0.0,
        };
        product.recalc_total_cost();
        product
    }

    /// Total stock value for this line
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Refresh the derived `total_cost` and return it
    pub fn recalc_total_cost(&mut self) -> f64 {
        self.total_cost = stock_value(self.price, self.quantity);
        self.total_cost
    }

    /// Whether this product's name matches a (not yet normalized) query
    pub fn matches_name(&self, query: &str) -> bool {
        self.name == normalize_name(query)
    }
}

/// Stock value of `quantity` units at `price` each
pub fn stock_value(price: f64, quantity: i64) -> f64 {
    price * quantity as f64
}

/// Normalize a product name into its lookup key.
///
/// Surrounding whitespace is trimmed, the first character is uppercased and
/// every following character is lowercased ("  wIDGET pro " -> "Widget pro").
/// The same function runs on creation, lookup and import so that keys
/// always compare equal regardless of how they were typed.
pub fn normalize_name(raw: &str) -> String {
    let mut chars = raw.trim().chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// A rejected field value, with a reason suitable for direct display
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("product name can't be empty")]
    #[diagnostic(code(invtrack::validation::empty_name))]
    EmptyName,

    #[error("product name '{0}' must contain only letters and spaces")]
    #[diagnostic(code(invtrack::validation::name_characters))]
    InvalidNameCharacters(String),

    #[error("'{0}' is not a numeric value")]
    #[diagnostic(
        code(invtrack::validation::not_a_number),
        help("Enter a number such as 2.5 or 10")
    )]
    NotANumber(String),

    #[error("'{0}' is not a whole number")]
    #[diagnostic(
        code(invtrack::validation::not_an_integer),
        help("Enter a number without decimals")
    )]
    NotAnInteger(String),

    #[error("{field} must be greater than zero (got {value})")]
    #[diagnostic(code(invtrack::validation::not_positive))]
    NotPositive { field: &'static str, value: String },

    #[error("{field} cannot be negative (got {value})")]
    #[diagnostic(code(invtrack::validation::negative))]
    Negative { field: &'static str, value: String },

    #[error("{field} must be a finite number")]
    #[diagnostic(code(invtrack::validation::not_finite))]
    NotFinite { field: &'static str },
}

/// Validate and normalize a product name typed by the user
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = normalize_name(raw);
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !name.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return Err(ValidationError::InvalidNameCharacters(name));
    }
    Ok(name)
}

/// Parse a price typed by the user; must be strictly positive
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let price = parse_decimal(raw)?;
    ensure_positive_price(price)?;
    Ok(price)
}

/// Parse a quantity typed by the user; must be strictly positive
pub fn parse_quantity(raw: &str) -> Result<i64, ValidationError> {
    let quantity = parse_integer(raw)?;
    ensure_positive_quantity(quantity)?;
    Ok(quantity)
}

/// Parse a finite decimal number without any range check
pub fn parse_decimal(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field: "price" });
    }
    Ok(value)
}

/// Parse an integer without any range check
pub fn parse_integer(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    trimmed
        .parse()
        .map_err(|_| ValidationError::NotAnInteger(trimmed.to_string()))
}

pub(crate) fn ensure_positive_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite { field: "price" });
    }
    if price <= 0.0 {
        return Err(ValidationError::NotPositive {
            field: "price",
            value: price.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn ensure_positive_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::NotPositive {
            field: "quantity",
            value: quantity.to_string(),
        });
    }
    Ok(())
}
