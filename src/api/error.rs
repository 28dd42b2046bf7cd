//! API Errors

use thiserror::Error;

use crate::form::DraftField;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}){}", detail(.message))]
    Server { status: u16, message: Option<String> },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("{} is invalid", .field.label())]
    Validation { field: DraftField },
}

fn detail(message: &Option<String>) -> String {
    message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default()
}

impl ApiError {
    pub fn server(status: u16, body: &str) -> Self {
        let body = body.trim();
        ApiError::Server {
            status,
            message: (!body.is_empty()).then(|| body.to_string()),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(error: gloo_net::Error) -> Self {
        match error {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Decode(error.to_string())
    }
}
