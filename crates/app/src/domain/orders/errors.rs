//! Order service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// No order exists under the given id.
    #[error("order not found")]
    NotFound,

    /// The platform refused the order; the message is its reason
    /// (typically insufficient stock for a line item).
    #[error("{0}")]
    Rejected(String),

    #[error("order service unavailable")]
    Http(#[source] reqwest::Error),

    #[error("unexpected response from order service: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for OrdersServiceError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error)
    }
}
