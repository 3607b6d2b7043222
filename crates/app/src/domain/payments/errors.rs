//! Payment service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    /// The payment gateway is not configured on the platform. Checkout must
    /// react by disabling every non-COD payment method.
    #[error("payment gateway unavailable")]
    Unavailable,

    /// The gateway's signature did not verify against the charge.
    #[error("payment verification failed")]
    VerificationRejected,

    /// The platform refused the request; the message is its reason.
    #[error("{0}")]
    Rejected(String),

    #[error("payment service unavailable")]
    Http(#[source] reqwest::Error),

    #[error("unexpected response from payment service: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for PaymentsServiceError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error)
    }
}
