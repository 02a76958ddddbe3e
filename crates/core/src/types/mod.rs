//! Core types for the Abyssinia storefront.
//!
//! This module provides type-safe wrappers for identifiers and prices.

pub mod id;
pub mod price;

pub use id::*;
pub use price::Price;
