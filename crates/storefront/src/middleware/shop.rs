//! Visitor shop extractor.
//!
//! Binds the request's session to a shop in the [`ShopRegistry`]. Reading
//! takes a snapshot; [`VisitorShop::update`] mutates the registry's copy
//! under its lock. A visitor whose session has no shop yet gets a fresh one
//! (empty cart, home page), and the session is only created on their first
//! change.

use abyssinia_core::Shop;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::session_keys;
use crate::shops::{ShopId, ShopRegistry};
use crate::state::AppState;

/// The visitor's shop, bound to their session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut visitor: VisitorShop) -> Result<impl IntoResponse> {
///     visitor.update(|shop| shop.update_quantity(id, 0)).await?;
///     Ok(render(visitor.shop()))
/// }
/// ```
pub struct VisitorShop {
    session: Session,
    shops: ShopRegistry,
    shop_id: Option<ShopId>,
    shop: Shop,
}

impl VisitorShop {
    /// The shop as of extraction, or as left by the last [`Self::update`].
    #[must_use]
    pub const fn shop(&self) -> &Shop {
        &self.shop
    }

    /// Apply one mutation atomically with respect to the visitor's other
    /// requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the shop id.
    pub async fn update<R>(&mut self, mutate: impl FnOnce(&mut Shop) -> R) -> Result<R, AppError> {
        let id = match self.shop_id {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                self.session.insert(session_keys::SHOP_ID, id).await?;
                self.shop_id = Some(id);
                id
            }
        };

        let (result, shop) = self.shops.update(id, mutate).await;
        self.shop = shop;
        Ok(result)
    }
}

impl<S> FromRequestParts<S> for VisitorShop
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let shops = AppState::from_ref(state).shops().clone();

        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer is not installed".to_string()))?;

        let shop_id = session.get::<ShopId>(session_keys::SHOP_ID).await?;
        let shop = match shop_id {
            Some(id) => shops.snapshot(id).await,
            None => Shop::new(),
        };

        Ok(Self {
            session,
            shops,
            shop_id,
            shop,
        })
    }
}
