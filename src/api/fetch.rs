//! Browser fetch transport

use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::{ReferrerPolicy, RequestCache, RequestMode, RequestRedirect};

use super::{ApiError, ApiRequest, ApiResponse, Method, Transport};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        }
        .mode(RequestMode::Cors)
        .cache(RequestCache::NoCache)
        .redirect(RequestRedirect::Follow)
        .referrer_policy(ReferrerPolicy::NoReferrer);

        let response = match &request.body {
            Some(body) => {
                builder
                    .header("Content-Type", "application/json")
                    .body(body.clone())?
                    .send()
                    .await?
            }
            None => builder.send().await?,
        };

        let status = response.status();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}
