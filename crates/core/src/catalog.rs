//! The fixed product catalog.
//!
//! The catalog is built once at startup and never mutated. It is exposed for
//! rendering by iteration only.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A purchasable coffee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// URL of the product photo.
    pub image: String,
    pub origin: String,
    pub roast: String,
}

/// Read-only, ordered list of products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from a list of products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The house collection of single-origin Ethiopian coffees.
    #[must_use]
    pub fn abyssinia() -> Self {
        Self::new(vec![
            product(
                1,
                "Yirgacheffe Reserve",
                "Floral and bright with notes of bergamot and citrus",
                2499,
                "https://images.unsplash.com/photo-1587734195503-904fca47e0e9?auto=format&fit=crop&w=800&q=80",
                "Yirgacheffe Region",
                "Light-Medium",
            ),
            product(
                2,
                "Sidamo Gold",
                "Full-bodied with wine-like complexity and berry notes",
                2299,
                "https://images.unsplash.com/photo-1610889556528-9a770e32642f?auto=format&fit=crop&w=800&q=80",
                "Sidamo Region",
                "Medium",
            ),
            product(
                3,
                "Harrar Wild",
                "Bold and exotic with hints of blueberry and dark chocolate",
                2699,
                "https://images.unsplash.com/photo-1514432324607-a09d9b4aefdd?auto=format&fit=crop&w=800&q=80",
                "Harrar Region",
                "Medium-Dark",
            ),
            product(
                4,
                "Limu Altitude",
                "Balanced and smooth with caramel and spice notes",
                2399,
                "https://images.unsplash.com/photo-1497935586351-b67a49e012bf?auto=format&fit=crop&w=800&q=80",
                "Limu Region",
                "Medium",
            ),
            product(
                5,
                "Guji Highland",
                "Complex and aromatic with jasmine and honey notes",
                2599,
                "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?auto=format&fit=crop&w=800&q=80",
                "Guji Zone",
                "Light",
            ),
            product(
                6,
                "Forest Blend",
                "Rich and earthy with dark chocolate and spice notes",
                2199,
                "https://images.unsplash.com/photo-1610889556528-9a770e32642f?auto=format&fit=crop&w=800&q=80",
                "Mixed Regions",
                "Dark",
            ),
        ])
    }

    /// Iterate over every product in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Find a product by scanning the catalog.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.iter().find(|product| product.id == id)
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns `true` if the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn product(
    id: i32,
    name: &str,
    description: &str,
    cents: i64,
    image: &str,
    origin: &str,
    roast: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Price::from_cents(cents),
        image: image.to_string(),
        origin: origin.to_string(),
        roast: roast.to_string(),
    }
}
