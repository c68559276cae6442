//! invtrack: a single-user product inventory tracker
//!
//! Products live in an in-memory [`core::Inventory`] for the lifetime of a
//! session and are saved to or loaded from a flat `name,price,quantity`
//! CSV file through [`exchange`].

pub mod cli;
pub mod core;
pub mod exchange;
