//! Core module - the product record, the inventory store and configuration

pub mod config;
pub mod inventory;
pub mod product;

pub use config::Config;
pub use inventory::{DeleteOutcome, Inventory, ProductUpdate, Statistics, StoreError, UpdateOutcome};
pub use product::{normalize_name, Product, ValidationError};
