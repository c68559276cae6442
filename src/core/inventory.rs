//! The in-memory inventory store
//!
//! [`Inventory`] is an ordered list of [`Product`]s owned by whoever runs
//! the session. Names act as the lookup key, but uniqueness is not enforced
//! on insert; lookups always resolve to the first match.

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::core::product::{
    ensure_positive_price, ensure_positive_quantity, normalize_name, validate_name, Product,
    ValidationError,
};

/// Errors reported by store operations
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum StoreError {
    #[error("Inventory is empty. Please add products before trying to {action}.")]
    #[diagnostic(code(invtrack::store::empty))]
    Empty { action: &'static str },

    #[error("Product '{name}' not found in the inventory.")]
    #[diagnostic(code(invtrack::store::not_found))]
    NotFound { name: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),
}

/// Requested changes for [`Inventory::update`]; `None` keeps the current value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductUpdate {
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

/// Result of an update: the product as it now stands plus any field that
/// was rejected and therefore left untouched
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub product: Product,
    pub rejected: Vec<ValidationError>,
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Removed(Product),
    Cancelled(Product),
}

/// Aggregate figures over the whole inventory.
///
/// `max_price` and `max_quantity` are the largest values present, not the
/// products that hold them. The default value is the empty sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total_value: f64,
    pub total_units: i64,
    pub max_price: Option<f64>,
    pub max_quantity: Option<i64>,
}

/// Ordered collection of products
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    products: Vec<Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from already constructed products, refreshing
    /// every derived total
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut inventory = Self { products };
        inventory.recalc_all();
        inventory
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Add a new product after validating its fields.
    ///
    /// Duplicate names are allowed; the name is normalized before storing.
    pub fn add(&mut self, name: &str, quantity: i64, price: f64) -> Result<&Product, StoreError> {
        let name = validate_name(name)?;
        ensure_positive_price(price)?;
        ensure_positive_quantity(quantity)?;

        log::debug!("adding product '{}' ({} x {})", name, quantity, price);
        self.products.push(Product::new(name, price, quantity));
        Ok(&self.products[self.products.len() - 1])
    }

    /// Append a product as-is (used by import reconciliation)
    pub(crate) fn push(&mut self, mut product: Product) {
        product.recalc_total_cost();
        self.products.push(product);
    }

    /// First product whose name matches the normalized query
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.position(name).map(|idx| &self.products[idx])
    }

    pub(crate) fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Product> {
        let idx = self.position(name)?;
        Some(&mut self.products[idx])
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = normalize_name(name);
        self.products.iter().position(|p| p.name == key)
    }

    /// Search for a product, distinguishing an empty store from a miss
    pub fn search(&self, name: &str) -> Result<&Product, StoreError> {
        self.ensure_not_empty("search products")?;
        self.find_by_name(name).ok_or_else(|| StoreError::NotFound {
            name: normalize_name(name),
        })
    }

    /// Update price and/or quantity of an existing product.
    ///
    /// Each provided field is validated on its own; a rejected field keeps
    /// its previous value while the other field may still change. The
    /// total is recomputed even when nothing changed.
    pub fn update(&mut self, name: &str, update: ProductUpdate) -> Result<UpdateOutcome, StoreError> {
        self.ensure_not_empty("update a product")?;
        let product = self.find_by_name_mut(name).ok_or_else(|| StoreError::NotFound {
            name: normalize_name(name),
        })?;

        let mut rejected = Vec::new();

        if let Some(price) = update.price {
            match ensure_positive_price(price) {
                Ok(()) => product.price = price,
                Err(e) => rejected.push(e),
            }
        }

        if let Some(quantity) = update.quantity {
            match ensure_positive_quantity(quantity) {
                Ok(()) => product.quantity = quantity,
                Err(e) => rejected.push(e),
            }
        }

        product.recalc_total_cost();
        log::debug!(
            "updated product '{}' (price {}, quantity {})",
            product.name,
            product.price,
            product.quantity
        );

        Ok(UpdateOutcome {
            product: product.clone(),
            rejected,
        })
    }

    /// Delete a product by name once `confirm` agrees.
    ///
    /// `confirm` sees the product that would be removed; declining keeps it
    /// and is not an error.
    pub fn delete<F>(&mut self, name: &str, confirm: F) -> Result<DeleteOutcome, StoreError>
    where
        F: FnOnce(&Product) -> bool,
    {
        self.ensure_not_empty("delete a product")?;
        let idx = self.position(name).ok_or_else(|| StoreError::NotFound {
            name: normalize_name(name),
        })?;

        if confirm(&self.products[idx]) {
            let removed = self.products.remove(idx);
            log::debug!("removed product '{}'", removed.name);
            Ok(DeleteOutcome::Removed(removed))
        } else {
            Ok(DeleteOutcome::Cancelled(self.products[idx].clone()))
        }
    }

    /// Aggregate statistics; fails on an empty inventory
    pub fn statistics(&mut self) -> Result<Statistics, StoreError> {
        self.ensure_not_empty("calculate statistics")?;
        self.recalc_all();

        let mut stats = Statistics::default();
        for product in &self.products {
            stats.total_value += product.total_cost();
            stats.total_units = stats.total_units.saturating_add(product.quantity);
            stats.max_price = Some(stats.max_price.map_or(product.price, |m| m.max(product.price)));
            stats.max_quantity = Some(
                stats
                    .max_quantity
                    .map_or(product.quantity, |m| m.max(product.quantity)),
            );
        }
        Ok(stats)
    }

    /// Refresh `total_cost` on every product
    pub fn recalc_all(&mut self) {
        for product in &mut self.products {
            product.recalc_total_cost();
        }
    }

    pub fn ensure_not_empty(&self, action: &'static str) -> Result<(), StoreError> {
        if self.products.is_empty() {
            Err(StoreError::Empty { action })
        } else {
            Ok(())
        }
    }
}

impl FromIterator<Product> for Inventory {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self::from_products(iter.into_iter().collect())
    }
}
