//! Client configuration

use std::path::PathBuf;

use clap::Parser;

use crate::api::ApiConfig;

/// Storefront client configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Black Money storefront client", long_about = None)]
pub struct AppConfig {
    /// Marketplace API base URL.
    #[arg(
        long,
        env = "STOREFRONT_API_URL",
        default_value = "http://localhost:8000/api"
    )]
    pub api_url: String,

    /// Bearer token for authenticated endpoints.
    #[arg(long, env = "STOREFRONT_API_TOKEN", default_value = "")]
    pub api_token: String,

    /// Directory holding durable client-local state (cart, wishlist).
    #[arg(long, env = "STOREFRONT_STATE_DIR", default_value = ".storefront")]
    pub state_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// API connection settings derived from this configuration.
    #[must_use]
    pub fn api(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            token: self.api_token.clone(),
        }
    }
}
