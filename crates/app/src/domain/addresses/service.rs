//! Addresses service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::StatusCode;

use crate::{
    api::{ApiClient, error_detail},
    domain::addresses::{
        errors::AddressesServiceError,
        models::{Address, NewAddress, PincodeInfo},
    },
};

#[derive(Debug, Clone)]
pub struct HttpAddressesService {
    api: ApiClient,
}

impl HttpAddressesService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AddressesService for HttpAddressesService {
    async fn list(&self) -> Result<Vec<Address>, AddressesServiceError> {
        let response = self.api.get("/addresses").send().await?;

        if !response.status().is_success() {
            let (_, detail) = error_detail(response).await;

            return Err(AddressesServiceError::UnexpectedResponse(detail));
        }

        Ok(response.json().await?)
    }

    async fn create(&self, address: NewAddress) -> Result<Address, AddressesServiceError> {
        let response = self.api.post("/addresses").json(&address).send().await?;

        if !response.status().is_success() {
            let (status, detail) = error_detail(response).await;

            return Err(match status {
                StatusCode::BAD_REQUEST => AddressesServiceError::Rejected(detail),
                _ => AddressesServiceError::UnexpectedResponse(detail),
            });
        }

        Ok(response.json().await?)
    }

    async fn lookup_pincode(&self, pincode: String) -> Result<PincodeInfo, AddressesServiceError> {
        let response = self.api.get(&format!("/pincode/{pincode}")).send().await?;

        if !response.status().is_success() {
            let (status, detail) = error_detail(response).await;

            return Err(match status {
                StatusCode::NOT_FOUND => AddressesServiceError::PincodeNotFound,
                _ => AddressesServiceError::UnexpectedResponse(detail),
            });
        }

        Ok(response.json().await?)
    }
}

#[automock]
#[async_trait]
pub trait AddressesService: Send + Sync {
    /// List the customer's saved addresses.
    async fn list(&self) -> Result<Vec<Address>, AddressesServiceError>;

    /// Save a new address to the customer's address book.
    async fn create(&self, address: NewAddress) -> Result<Address, AddressesServiceError>;

    /// Resolve city and state for a pincode.
    async fn lookup_pincode(&self, pincode: String) -> Result<PincodeInfo, AddressesServiceError>;
}
