//! Session-related types.
//!
//! A session carries only the id of the visitor's
//! [`abyssinia_core::Shop`]; the shop itself lives server-side in
//! [`crate::shops::ShopRegistry`]. Both are held in memory only, so a restart
//! sends every visitor back to an empty cart on the home page.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the id of the visitor's shop (cart and current page).
    pub const SHOP_ID: &str = "shop_id";
}
