//! Address service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressesServiceError {
    /// No location is known for the given pincode.
    #[error("pincode not found")]
    PincodeNotFound,

    /// The platform rejected the address payload.
    #[error("{0}")]
    Rejected(String),

    #[error("address service unavailable")]
    Http(#[source] reqwest::Error),

    #[error("unexpected response from address service: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for AddressesServiceError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error)
    }
}
