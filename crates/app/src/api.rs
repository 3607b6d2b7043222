//! Marketplace API client
//!
//! Thin wrapper over `reqwest` shared by every domain service: base URL
//! joining, bearer authentication and the backend's `{"detail": ...}` error
//! body convention.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use storefront::prices::Paise;

/// Configuration for connecting to the marketplace backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, e.g. `"http://localhost:8000/api"`.
    pub base_url: String,

    /// Bearer token sent on authenticated requests.
    pub token: String,
}

/// HTTP client for the marketplace REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.post(self.url(path)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        if self.config.token.is_empty() {
            request
        } else {
            request.bearer_auth(&self.config.token)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Extracts the backend's `detail` message from a failed response, falling
/// back to the status code when the body is not in the expected shape.
pub(crate) async fn error_detail(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let detail = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.detail)
        .unwrap_or_else(|_| format!("request failed with status {status}"));

    (status, detail)
}

/// Converts a wire rupee amount to paise, rounding to the nearest paisa.
///
/// The backend speaks rupees-with-decimals; everything internal is integer
/// paise. Non-finite or negative amounts collapse to zero.
pub(crate) fn rupees_to_paise(amount: f64) -> Paise {
    let paise = (amount * 100.0).round();

    if paise.is_finite() && paise >= 0.0 {
        // `as` saturates at u64::MAX for out-of-range floats
        Paise::new(paise as u64)
    } else {
        Paise::new(0)
    }
}

/// Converts paise to the backend's rupee representation.
pub(crate) fn paise_to_rupees(amount: Paise) -> f64 {
    // f64 holds every paise amount a real order can reach exactly
    (amount.value() as f64) / 100.0
}
