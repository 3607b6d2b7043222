//! Platform Settings

pub mod errors;
pub mod models;
pub mod service;

pub use errors::SettingsServiceError;
pub use models::PlatformSettings;
pub use service::*;
