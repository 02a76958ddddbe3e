//! Catalog page view.

use abyssinia_core::{Catalog, Product};
use askama::Template;
use askama_web::WebTemplate;

use crate::filters;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub origin: String,
    pub roast: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            origin: product.origin.clone(),
            roast: product.roast.clone(),
        }
    }
}

/// Render every catalog product, in catalog order.
#[must_use]
pub fn product_views(catalog: &Catalog) -> Vec<ProductView> {
    catalog.iter().map(ProductView::from).collect()
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate {
    pub base: String,
    pub nonce: String,
    /// Cart badge next to "View Cart".
    pub cart_count: u64,
    pub products: Vec<ProductView>,
}
