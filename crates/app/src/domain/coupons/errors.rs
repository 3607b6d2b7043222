//! Coupon service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CouponsServiceError {
    /// No active coupon exists under the given code.
    #[error("coupon not found or inactive")]
    NotFound,

    /// The coupon exists but does not apply; the message is the platform's
    /// own rejection reason (expired, minimum order, usage limit).
    #[error("{0}")]
    Rejected(String),

    #[error("coupon service unavailable")]
    Http(#[source] reqwest::Error),

    #[error("unexpected response from coupon service: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for CouponsServiceError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error)
    }
}
