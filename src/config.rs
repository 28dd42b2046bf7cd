//! API Configuration
//!
//! The base URL comes from `PRODUCT_API_URL` at build time and can be
//! overridden at start time with `<meta name="product-api-url" content="...">`.

use leptos::logging::log;
use wasm_bindgen::JsCast;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
const META_NAME: &str = "product-api-url";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Start-time override wins over the build-time value
    pub fn resolve(build_time: Option<&str>, start_time: Option<&str>) -> Self {
        fn pick(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|s| !s.is_empty())
        }
        let url = pick(start_time)
            .or_else(|| pick(build_time))
            .unwrap_or(DEFAULT_API_URL);
        Self::new(url)
    }

    pub fn from_env() -> Self {
        let config = Self::resolve(option_env!("PRODUCT_API_URL"), meta_override().as_deref());
        log!("[CATALOG] API base URL: {}", config.base_url);
        config
    }
}

fn meta_override() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"{}\"]", META_NAME);
    let element = document.query_selector(&selector).ok()??;
    let meta = element.dyn_into::<web_sys::HtmlMetaElement>().ok()?;
    Some(meta.content())
}
