//! Single-page view and navigation handlers.
//!
//! The storefront has one URL. What it shows depends on the visitor's
//! current [`Page`]; navigation buttons post a [`NavAction`] and are
//! redirected back to that URL.

use abyssinia_core::{NavAction, Page, Shop};
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::{CspNonce, VisitorShop};
use crate::routes::cart::{CartTemplate, CartView};
use crate::routes::home::{HomeTemplate, LandingContent};
use crate::routes::products::{CatalogTemplate, product_views};
use crate::state::AppState;

/// Navigation form data.
#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    /// One of the `NavAction` form values, e.g. `view_cart`.
    pub action: String,
}

/// Render the page the visitor is currently on.
#[must_use]
pub fn render_page(state: &AppState, shop: &Shop, nonce: String) -> Response {
    let base = state.base_path().as_str().to_string();
    let cart_count = shop.cart_item_count();

    match shop.page() {
        Page::Home => HomeTemplate {
            base,
            nonce,
            cart_count,
            content: LandingContent::default(),
        }
        .into_response(),
        Page::Catalog => CatalogTemplate {
            base,
            nonce,
            cart_count,
            products: product_views(state.catalog()),
        }
        .into_response(),
        Page::Cart => CartTemplate {
            base,
            nonce,
            cart: CartView::from(shop.cart()),
        }
        .into_response(),
    }
}

/// Display the current page.
#[instrument(skip(state, visitor, nonce))]
pub async fn show(
    State(state): State<AppState>,
    visitor: VisitorShop,
    CspNonce(nonce): CspNonce,
) -> Response {
    render_page(&state, visitor.shop(), nonce)
}

/// Take a navigation action, then redirect back to the page.
///
/// Actions the current page does not offer (a stale tab, a double submit)
/// leave the page unchanged.
///
/// # Errors
///
/// Returns 400 if the action is not a known navigation action.
#[instrument(skip(state, visitor))]
pub async fn navigate(
    State(state): State<AppState>,
    mut visitor: VisitorShop,
    Form(form): Form<NavigateForm>,
) -> Result<Response> {
    let action: NavAction = form.action.parse()?;

    match visitor.update(|shop| shop.navigate(action)).await? {
        Ok(page) => {
            let page_name = page.to_string();
            tracing::debug!(%action, page = %page_name, "navigated");
            add_breadcrumb(
                "navigation",
                "Navigated",
                Some(&[("action", action.as_str()), ("page", page_name.as_str())]),
            );
        }
        Err(e) => tracing::debug!(error = %e, "ignoring unavailable navigation action"),
    }

    Ok(Redirect::to(&state.base_path().href("/")).into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use abyssinia_core::{Catalog, ProductId};
    use axum::http::StatusCode;

    use super::*;
    use crate::config::StorefrontConfig;

    async fn body_of(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn state() -> AppState {
        AppState::new(StorefrontConfig::default(), Catalog::abyssinia())
    }

    #[tokio::test]
    async fn test_renders_home_for_fresh_shop() {
        let response = render_page(&state(), &Shop::new(), "n".to_string());
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_of(response).await.contains("Explore Our Collection"));
    }

    #[tokio::test]
    async fn test_renders_each_page() {
        let state = state();
        let mut shop = Shop::new();

        shop.navigate(NavAction::ExploreCollection).unwrap();
        let catalog_html = body_of(render_page(&state, &shop, String::new())).await;
        assert!(catalog_html.contains("Our Premium Collection"));

        shop.add_to_cart(state.catalog().find(ProductId::new(3)).unwrap());
        shop.navigate(NavAction::ViewCart).unwrap();
        let cart_html = body_of(render_page(&state, &shop, String::new())).await;
        assert!(cart_html.contains("Your Cart"));
        assert!(cart_html.contains("Harrar Wild"));
        assert!(cart_html.contains("$26.99"));
    }
}
