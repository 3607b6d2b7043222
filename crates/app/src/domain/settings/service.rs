//! Platform settings service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    api::{ApiClient, error_detail},
    domain::settings::{errors::SettingsServiceError, models::PlatformSettings},
};

#[derive(Debug, Clone)]
pub struct HttpSettingsService {
    api: ApiClient,
}

impl HttpSettingsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SettingsService for HttpSettingsService {
    async fn fetch(&self) -> Result<PlatformSettings, SettingsServiceError> {
        let response = self.api.get("/platform-settings").send().await?;

        if !response.status().is_success() {
            let (_, detail) = error_detail(response).await;

            return Err(SettingsServiceError::UnexpectedResponse(detail));
        }

        Ok(response.json().await?)
    }
}

#[automock]
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Fetch the current platform rates.
    async fn fetch(&self) -> Result<PlatformSettings, SettingsServiceError>;
}
