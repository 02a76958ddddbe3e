//! Domain models for storefront.
//!
//! The shop itself (cart + current page) lives in `abyssinia-core`; this
//! module only describes how a session points at it.

pub mod session;

pub use session::keys as session_keys;
