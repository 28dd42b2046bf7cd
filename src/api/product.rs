//! Product Endpoints
//!
//! `GET/POST/PUT {base}/products` and `DELETE {base}/products/{id}`.

use leptos::logging::{log, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use super::{ApiError, ApiRequest, ApiResponse, Method, Transport};
use crate::models::{Product, ProductPayload};

/// Characters escaped when an id is placed in a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub struct ProductClient<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> ProductClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn collection_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!(
            "{}/products/{}",
            self.base_url,
            utf8_percent_encode(id, PATH_SEGMENT)
        )
    }

    pub fn list_request(&self) -> ApiRequest {
        ApiRequest {
            method: Method::Get,
            url: self.collection_url(),
            body: None,
        }
    }

    pub fn create_request(&self, payload: &ProductPayload) -> Result<ApiRequest, ApiError> {
        let body = ProductPayload { id: None, ..payload.clone() };
        Ok(ApiRequest {
            method: Method::Post,
            url: self.collection_url(),
            body: Some(serde_json::to_string(&body)?),
        })
    }

    pub fn update_request(&self, id: &str, payload: &ProductPayload) -> Result<ApiRequest, ApiError> {
        let body = ProductPayload {
            id: Some(id.to_string()),
            ..payload.clone()
        };
        Ok(ApiRequest {
            method: Method::Put,
            url: self.collection_url(),
            body: Some(serde_json::to_string(&body)?),
        })
    }

    pub fn delete_request(&self, id: &str) -> ApiRequest {
        ApiRequest {
            method: Method::Delete,
            url: self.item_url(id),
            body: None,
        }
    }

    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        log!("[API] {} {}", request.method.as_str(), request.url);
        let response = self.transport.send(request).await.map_err(|e| {
            warn!("[API] {} {} failed: {}", request.method.as_str(), request.url, e);
            e
        })?;

        if !response.is_success() {
            warn!(
                "[API] {} {} returned {}",
                request.method.as_str(),
                request.url,
                response.status
            );
            return Err(ApiError::server(response.status, &response.body));
        }
        Ok(response)
    }

    async fn execute_json<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R, ApiError> {
        let response = self.execute(request).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.execute_json(&self.list_request()).await
    }

    /// `None` when the server accepted the product but answered with something
    /// else, such as an insert acknowledgement
    pub async fn create(&self, payload: &ProductPayload) -> Result<Option<Product>, ApiError> {
        let response = self.execute(&self.create_request(payload)?).await?;
        match serde_json::from_str::<Product>(&response.body) {
            Ok(product) => Ok(Some(product)),
            Err(e) => {
                warn!("[API] create response for {} not a product: {}", payload.code, e);
                Ok(None)
            }
        }
    }

    /// Falls back to the submitted values when the server does not echo the product
    pub async fn update(&self, id: &str, payload: &ProductPayload) -> Result<Product, ApiError> {
        let response = self.execute(&self.update_request(id, payload)?).await?;
        match serde_json::from_str::<Product>(&response.body) {
            Ok(product) => Ok(product),
            Err(e) => {
                warn!("[API] update response for {} not a product: {}", id, e);
                Ok(payload.clone().into_product(id.to_string()))
            }
        }
    }

    /// Returns the response JSON, `Null` for an empty body
    pub async fn delete(&self, id: &str) -> Result<serde_json::Value, ApiError> {
        let response = self.execute(&self.delete_request(id)).await?;
        if response.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&response.body).unwrap_or(serde_json::Value::String(response.body)))
    }
}
