//! Product Form Draft
//!
//! Typed state behind the add/update modal and its validation into a payload.

use crate::api::ApiError;
use crate::models::{format_price, Product, ProductPayload};

/// Editable fields of the product form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Code,
    Name,
    Price,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [DraftField::Code, DraftField::Name, DraftField::Price];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Code => "Code",
            DraftField::Name => "Name",
            DraftField::Price => "Price",
        }
    }

    /// HTML input type for the field
    pub fn input_type(&self) -> &'static str {
        match self {
            DraftField::Price => "number",
            _ => "text",
        }
    }
}

/// Unvalidated text values bound to the modal inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub code: String,
    pub name: String,
    pub price: String,
}

impl ProductDraft {
    pub fn from_product(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            name: product.name.clone(),
            price: format_price(product.price),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Code => &self.code,
            DraftField::Name => &self.name,
            DraftField::Price => &self.price,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Code => self.code = value,
            DraftField::Name => self.name = value,
            DraftField::Price => self.price = value,
        }
    }

    /// Validate into a request body; `id` is attached for updates
    pub fn to_payload(&self, id: Option<String>) -> Result<ProductPayload, ApiError> {
        let code = self.code.trim();
        if code.is_empty() {
            return Err(ApiError::Validation { field: DraftField::Code });
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation { field: DraftField::Name });
        }
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or(ApiError::Validation { field: DraftField::Price })?;

        Ok(ProductPayload {
            id,
            code: code.to_string(),
            name: name.to_string(),
            price,
        })
    }
}
