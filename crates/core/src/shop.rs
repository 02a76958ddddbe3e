//! Per-visitor storefront state.
//!
//! A [`Shop`] is the single owner of a visitor's cart and current page. The
//! cart can only change through [`Shop::add_to_cart`] and
//! [`Shop::update_quantity`], and the page only through [`Shop::navigate`].

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::Product;
use crate::navigation::{NavAction, NavigationError, Page};
use crate::types::{Price, ProductId};

/// Cart and navigation state for one visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    cart: Cart,
    page: Page,
}

impl Shop {
    /// A fresh shop: empty cart, on the home page.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cart: Cart::new(),
            page: Page::Home,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    pub fn add_to_cart(&mut self, product: &Product) {
        self.cart.add(product);
    }

    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        self.cart.update_quantity(id, quantity);
    }

    /// Take a navigation action.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Unavailable`] if the action is not offered
    /// by the current page. The page is left unchanged in that case.
    pub fn navigate(&mut self, action: NavAction) -> Result<Page, NavigationError> {
        let next = self
            .page
            .next(action)
            .ok_or(NavigationError::Unavailable {
                from: self.page,
                action,
            })?;
        self.page = next;
        Ok(next)
    }

    /// Badge count: total units in the cart.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total()
    }
}
