//! Cart route handlers.
//!
//! Cart changes are plain form posts. Browsers get a `303 See Other` back to
//! the page; htmx requests get the updated fragment and an `HX-Trigger` so
//! other badges can refresh.

use abyssinia_core::{Cart, CartEntry, ProductId};
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::VisitorShop;
use crate::routes::is_htmx;
use crate::state::AppState;

/// Event name htmx listeners refresh on.
const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub quantity: u64,
    /// Quantity posted by the decrement control; 0 removes the entry.
    pub decrement_to: u64,
    pub increment_to: u64,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        // No shipping or tax, so the subtotal is the total.
        let total = cart.total().display();
        Self {
            items: cart.entries().iter().map(CartItemView::from).collect(),
            subtotal: total.clone(),
            total,
            item_count: cart.item_count(),
        }
    }
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        let product = entry.product();
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            quantity: entry.quantity(),
            decrement_to: entry.quantity().saturating_sub(1),
            increment_to: entry.quantity().saturating_add(1),
            line_price: entry.line_total().display(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    /// Any integer; zero or less removes the entry.
    pub quantity: i64,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub base: String,
    pub nonce: String,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub base: String,
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

// =============================================================================
// Handlers
// =============================================================================

/// Add one unit of a catalog product to the visitor's cart.
///
/// # Errors
///
/// Returns 404 if the product is not in the catalog.
#[instrument(skip(state, headers, visitor))]
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut visitor: VisitorShop,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .find(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    visitor.update(|shop| shop.add_to_cart(product)).await?;

    let count = visitor.shop().cart_item_count();
    let product_id = form.product_id.to_string();
    tracing::debug!(%product_id, cart_count = count, "added to cart");
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product_id.as_str())]),
    );

    if is_htmx(&headers) {
        return Ok((
            AppendHeaders([CART_UPDATED_TRIGGER]),
            CartCountTemplate { count },
        )
            .into_response());
    }

    Ok(Redirect::to(&state.base_path().href("/")).into_response())
}

/// Set the quantity of a cart entry.
///
/// Quantities of zero or less remove the entry; unknown products are
/// ignored.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
#[instrument(skip(state, headers, visitor))]
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut visitor: VisitorShop,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    visitor
        .update(|shop| shop.update_quantity(form.product_id, form.quantity))
        .await?;

    tracing::debug!(
        product_id = %form.product_id,
        quantity = form.quantity,
        "updated cart quantity"
    );
    let product_id = form.product_id.to_string();
    let quantity = form.quantity.to_string();
    add_breadcrumb(
        "cart",
        "Updated quantity",
        Some(&[
            ("product_id", product_id.as_str()),
            ("quantity", quantity.as_str()),
        ]),
    );

    if is_htmx(&headers) {
        return Ok((
            AppendHeaders([CART_UPDATED_TRIGGER]),
            CartItemsTemplate {
                base: state.base_path().as_str().to_string(),
                cart: CartView::from(visitor.shop().cart()),
            },
        )
            .into_response());
    }

    Ok(Redirect::to(&state.base_path().href("/")).into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(visitor))]
pub async fn count(visitor: VisitorShop) -> impl IntoResponse {
    CartCountTemplate {
        count: visitor.shop().cart_item_count(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use abyssinia_core::Catalog;

    use super::*;

    fn scenario_cart() -> Cart {
        let catalog = Catalog::abyssinia();
        let mut cart = Cart::new();
        cart.add(catalog.find(ProductId::new(1)).unwrap());
        cart.add(catalog.find(ProductId::new(1)).unwrap());
        cart.add(catalog.find(ProductId::new(2)).unwrap());
        cart
    }

    #[test]
    fn test_cart_view_from_cart() {
        let view = CartView::from(&scenario_cart());

        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "$72.97");
        assert_eq!(view.subtotal, "$72.97");
        assert_eq!(view.items.len(), 2);

        let first = view.items.first().unwrap();
        assert_eq!(first.quantity, 2);
        assert_eq!(first.decrement_to, 1);
        assert_eq!(first.increment_to, 3);
        assert_eq!(first.line_price, "$49.98");
    }

    #[test]
    fn test_decrement_at_one_posts_zero() {
        let view = CartView::from(&scenario_cart());
        let second = view.items.get(1).unwrap();
        assert_eq!(second.quantity, 1);
        assert_eq!(second.decrement_to, 0);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert!(view.items.is_empty());
        assert_eq!(view.total, "$0.00");
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_cart_page_renders_summary() {
        let html = CartTemplate {
            base: "/coffeestore".to_string(),
            nonce: String::new(),
            cart: CartView::from(&scenario_cart()),
        }
        .render()
        .unwrap();

        assert!(html.contains("Order Summary"));
        assert!(html.contains("$72.97"));
        assert!(html.contains("Proceed to Checkout"));
        assert!(html.contains(r#"action="/coffeestore/cart/update""#));
        assert!(html.contains(r#"value="back_to_products""#));
    }

    #[test]
    fn test_empty_cart_page() {
        let html = CartTemplate {
            base: String::new(),
            nonce: String::new(),
            cart: CartView::empty(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Your cart is empty"));
        assert!(html.contains("Continue Shopping"));
        assert!(!html.contains("Proceed to Checkout"));
    }

    #[test]
    fn test_count_fragment() {
        let html = CartCountTemplate { count: 3 }.render().unwrap();
        assert!(html.contains('3'));
        assert!(CartCountTemplate { count: 0 }.render().unwrap().trim().is_empty());
    }

    #[test]
    fn test_count_fragment_caps_badge() {
        let html = CartCountTemplate { count: 150 }.render().unwrap();
        assert!(html.contains(">99+<"));
    }
}
