//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storefront::items::LineItem;

use crate::{
    api::{ApiClient, error_detail, paise_to_rupees, rupees_to_paise},
    domain::orders::{
        errors::OrdersServiceError,
        models::{NewOrder, Order, OrderTracking, ShippingAddress, TrackingEvent},
    },
};

#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    api: ApiClient,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

/// One cart line in the order payload, priced in rupees as the platform
/// expects.
#[derive(Debug, Serialize)]
struct OrderItemDto {
    product_id: Uuid,
    seller_id: Uuid,
    name: String,
    price: f64,
    quantity: u32,
    size: String,
    color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl From<&LineItem> for OrderItemDto {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id,
            seller_id: item.seller_id,
            name: item.name.clone(),
            price: paise_to_rupees(item.unit_price),
            quantity: item.quantity,
            size: item.variant.size().to_string(),
            color: item.variant.color().to_string(),
            image: item.image.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateOrderRequest {
    items: Vec<OrderItemDto>,
    total_amount: f64,
    shipping_address: ShippingAddress,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: Uuid,
    total_amount: f64,
    status: String,
}

#[derive(Debug, Deserialize)]
struct TrackingResponse {
    order: OrderResponse,
    #[serde(default)]
    delivery_history: Vec<TrackingEvent>,
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn create(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let request = CreateOrderRequest {
            items: order.items.iter().map(Into::into).collect(),
            total_amount: paise_to_rupees(order.total),
            shipping_address: order.shipping_address,
        };

        let response = self.api.post("/orders").json(&request).send().await?;

        if !response.status().is_success() {
            let (status, detail) = error_detail(response).await;

            return Err(match status {
                StatusCode::BAD_REQUEST => OrdersServiceError::Rejected(detail),
                _ => OrdersServiceError::UnexpectedResponse(detail),
            });
        }

        let parsed: OrderResponse = response.json().await?;

        info!(order_id = %parsed.id, "order created");

        Ok(Order {
            id: parsed.id,
            total: rupees_to_paise(parsed.total_amount),
            status: parsed.status,
        })
    }

    async fn tracking(&self, order_id: Uuid) -> Result<OrderTracking, OrdersServiceError> {
        let response = self
            .api
            .get(&format!("/orders/{order_id}/tracking"))
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, detail) = error_detail(response).await;

            return Err(match status {
                StatusCode::NOT_FOUND => OrdersServiceError::NotFound,
                _ => OrdersServiceError::UnexpectedResponse(detail),
            });
        }

        let parsed: TrackingResponse = response.json().await?;

        Ok(OrderTracking {
            order_id: parsed.order.id,
            status: parsed.order.status,
            events: parsed.delivery_history,
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Create an order from the current cart snapshot.
    ///
    /// Inventory is verified and the coupon's redemption counted on the
    /// platform side; from here the order is immutable except for payment
    /// verification finalising its status.
    async fn create(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Fetch the tracking view of an order.
    async fn tracking(&self, order_id: Uuid) -> Result<OrderTracking, OrdersServiceError>;
}
