//! Page navigation state machine.
//!
//! ```text
//!          ExploreCollection          ViewCart
//!   Home -------------------> Catalog ---------> Cart
//!        <-------------------         <---------
//!            BackToHome             BackToProducts
//! ```
//!
//! Transitions only happen in response to explicit user actions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The page currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Catalog,
    Cart,
}

impl Page {
    /// The page reached by taking `action` from this page, if the action is
    /// available here.
    #[must_use]
    pub const fn next(self, action: NavAction) -> Option<Self> {
        match (self, action) {
            (Self::Home, NavAction::ExploreCollection) | (Self::Cart, NavAction::BackToProducts) => {
                Some(Self::Catalog)
            }
            (Self::Catalog, NavAction::BackToHome) => Some(Self::Home),
            (Self::Catalog, NavAction::ViewCart) => Some(Self::Cart),
            _ => None,
        }
    }

    /// Actions offered by this page.
    #[must_use]
    pub const fn actions(self) -> &'static [NavAction] {
        match self {
            Self::Home => &[NavAction::ExploreCollection],
            Self::Catalog => &[NavAction::BackToHome, NavAction::ViewCart],
            Self::Cart => &[NavAction::BackToProducts],
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Catalog => write!(f, "catalog"),
            Self::Cart => write!(f, "cart"),
        }
    }
}

/// A user navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavAction {
    /// "Explore Our Collection" on the landing page.
    ExploreCollection,
    BackToHome,
    ViewCart,
    /// "Back to Products" and "Continue Shopping" on the cart page.
    BackToProducts,
}

impl NavAction {
    /// Form value for this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExploreCollection => "explore_collection",
            Self::BackToHome => "back_to_home",
            Self::ViewCart => "view_cart",
            Self::BackToProducts => "back_to_products",
        }
    }
}

impl fmt::Display for NavAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized navigation action string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown navigation action: {0}")]
pub struct ParseNavActionError(pub String);

impl FromStr for NavAction {
    type Err = ParseNavActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explore_collection" => Ok(Self::ExploreCollection),
            "back_to_home" => Ok(Self::BackToHome),
            "view_cart" => Ok(Self::ViewCart),
            "back_to_products" => Ok(Self::BackToProducts),
            _ => Err(ParseNavActionError(s.to_string())),
        }
    }
}

/// Navigation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("action {action} is not available from the {from} page")]
    Unavailable { from: Page, action: NavAction },
}
