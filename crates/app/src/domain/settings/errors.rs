//! Settings service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsServiceError {
    #[error("settings service unavailable")]
    Http(#[source] reqwest::Error),

    #[error("unexpected response from settings service: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for SettingsServiceError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error)
    }
}
