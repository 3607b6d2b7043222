//! App Context

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::{
    api::ApiClient,
    checkout::Checkout,
    config::AppConfig,
    domain::{
        addresses::{AddressesService, HttpAddressesService},
        cart::{CartStore, CartStoreError},
        coupons::{CouponsService, HttpCouponsService},
        orders::{HttpOrdersService, OrdersService},
        payments::{GatewayCheckout, HttpPaymentsService, PaymentsService},
        settings::{HttpSettingsService, SettingsService},
        wishlist::{WishlistStore, WishlistStoreError},
    },
    store::JsonFileStore,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open the stored cart")]
    Cart(#[from] CartStoreError),

    #[error("failed to open the stored wishlist")]
    Wishlist(#[from] WishlistStoreError),
}

/// Everything a storefront surface needs: the durable client-local stores
/// and one client per collaborating platform service.
#[derive(Clone)]
pub struct AppContext {
    pub cart: Arc<Mutex<CartStore>>,
    pub wishlist: Arc<Mutex<WishlistStore>>,
    pub addresses: Arc<dyn AddressesService>,
    pub coupons: Arc<dyn CouponsService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
    pub settings: Arc<dyn SettingsService>,
}

impl AppContext {
    /// Build the application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored cart or wishlist cannot be opened.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let api = ApiClient::new(config.api());
        let store = Arc::new(JsonFileStore::new(config.state_dir.clone()));

        Ok(Self {
            cart: Arc::new(Mutex::new(CartStore::open(store.clone())?)),
            wishlist: Arc::new(Mutex::new(WishlistStore::open(store)?)),
            addresses: Arc::new(HttpAddressesService::new(api.clone())),
            coupons: Arc::new(HttpCouponsService::new(api.clone())),
            orders: Arc::new(HttpOrdersService::new(api.clone())),
            payments: Arc::new(HttpPaymentsService::new(api.clone())),
            settings: Arc::new(HttpSettingsService::new(api)),
        })
    }

    /// A checkout orchestrator bound to this context and the given gateway
    /// surface.
    #[must_use]
    pub fn checkout(&self, gateway: Arc<dyn GatewayCheckout>) -> Checkout {
        Checkout::new(
            self.cart.clone(),
            self.addresses.clone(),
            self.coupons.clone(),
            self.orders.clone(),
            self.payments.clone(),
            gateway,
            self.settings.clone(),
        )
    }
}
