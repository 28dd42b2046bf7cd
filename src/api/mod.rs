//! Product API Client
//!
//! HTTP bindings to the product endpoints, organized by concern.

mod error;
mod fetch;
mod product;

use async_trait::async_trait;

// Re-export all public items
pub use error::ApiError;
pub use fetch::FetchTransport;
pub use product::ProductClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A fully resolved request: absolute URL plus an optional JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and hands back the raw response
///
/// Only transport failures are errors here; status handling belongs to the caller.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}
