//! Abyssinia Core - storefront domain types.
//!
//! This crate holds the storefront's state model:
//! - [`catalog`] - The fixed, read-only product list
//! - [`cart`] - Cart entries with merge-by-id and remove-at-zero semantics
//! - [`navigation`] - The Home / Catalog / Cart page state machine
//! - [`shop`] - The per-visitor owner of cart and page
//! - [`types`] - Newtype wrappers for ids and prices
//!
//! # Architecture
//!
//! The core crate contains only types and logic - no I/O, no HTTP, no
//! sessions. Derived values (item count, total) are always recomputed from
//! the cart rather than cached.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod navigation;
pub mod shop;
pub mod types;

pub use cart::{Cart, CartEntry};
pub use catalog::{Catalog, Product};
pub use navigation::{NavAction, NavigationError, Page, ParseNavActionError};
pub use shop::Shop;
pub use types::*;
