//! Frontend Models
//!
//! Data structures matching the product API.

use leptos::logging::warn;
use serde::{Deserialize, Deserializer, Serialize};

/// Product data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
}

/// Request body for create (no id) and update (with id)
///
/// The id is written as `id` even though reads also accept `_id`; backends
/// keyed on `_id` must map it on their side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    pub price: f64,
}

impl ProductPayload {
    /// Product as it should look after the server accepted this payload
    pub fn into_product(self, id: String) -> Product {
        Product {
            id,
            code: self.code,
            name: self.name,
            price: self.price,
        }
    }
}

/// One table row, derived from a product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: String,
    pub code: String,
    pub name: String,
    pub price: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            code: product.code.clone(),
            name: product.name.clone(),
            price: format_price(product.price),
        }
    }
}

pub fn product_rows(products: &[Product]) -> Vec<ProductRow> {
    products.iter().map(ProductRow::from).collect()
}

/// Whole numbers print without a fractional part, like the API returns them
pub fn format_price(price: f64) -> String {
    format!("{}", price)
}

// Stored prices may be numbers or the raw strings older clients posted.
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
        Null(Option<()>),
    }

    Ok(match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => n,
        RawPrice::Text(s) => s.trim().parse::<f64>().unwrap_or_else(|_| {
            warn!("[CATALOG] non-numeric price {:?} read as 0", s);
            0.0
        }),
        RawPrice::Null(_) => {
            warn!("[CATALOG] null price read as 0");
            0.0
        }
    })
}
