//! Payments service.
//!
//! Wraps the platform's payment-gateway bridge: order-create and signature
//! verification. The interactive checkout surface itself is behind the
//! separate [`GatewayCheckout`] seam.

use async_trait::async_trait;
use mockall::automock;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use storefront::prices::Paise;

use crate::{
    api::{ApiClient, error_detail},
    domain::payments::{
        errors::PaymentsServiceError,
        models::{GatewayOutcome, GatewaySession, SignatureTriple},
    },
};

#[derive(Debug, Clone)]
pub struct HttpPaymentsService {
    api: ApiClient,
}

impl HttpPaymentsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[derive(Debug, Deserialize)]
struct CreatePaymentOrderResponse {
    razorpay_order_id: String,
    key_id: String,
    amount: u64,
    currency: String,
    internal_order_id: Uuid,
}

#[derive(Debug, Serialize)]
struct VerifyPaymentRequest {
    razorpay_order_id: String,
    razorpay_payment_id: String,
    razorpay_signature: String,
    internal_order_id: Uuid,
}

#[async_trait]
impl PaymentsService for HttpPaymentsService {
    async fn create_gateway_session(
        &self,
        amount: Paise,
        order_id: Uuid,
    ) -> Result<GatewaySession, PaymentsServiceError> {
        let body = json!({
            "amount": crate::api::paise_to_rupees(amount),
            "order_id": order_id,
            "notes": { "order_id": order_id },
        });

        let response = self
            .api
            .post("/payments/create-order")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, detail) = error_detail(response).await;

            return Err(match status {
                StatusCode::SERVICE_UNAVAILABLE => PaymentsServiceError::Unavailable,
                StatusCode::BAD_REQUEST => PaymentsServiceError::Rejected(detail),
                _ => PaymentsServiceError::UnexpectedResponse(detail),
            });
        }

        let parsed: CreatePaymentOrderResponse = response.json().await?;

        Ok(GatewaySession {
            gateway_order_id: parsed.razorpay_order_id,
            key_id: parsed.key_id,
            // the bridge already quotes the amount in paise
            amount: Paise::new(parsed.amount),
            currency: parsed.currency,
            internal_order_id: parsed.internal_order_id,
        })
    }

    async fn verify(
        &self,
        triple: SignatureTriple,
        internal_order_id: Uuid,
    ) -> Result<(), PaymentsServiceError> {
        let request = VerifyPaymentRequest {
            razorpay_order_id: triple.gateway_order_id,
            razorpay_payment_id: triple.payment_id,
            razorpay_signature: triple.signature,
            internal_order_id,
        };

        let response = self
            .api
            .post("/payments/verify")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, detail) = error_detail(response).await;

            error!(%internal_order_id, %status, "payment verification rejected: {detail}");

            return Err(match status {
                StatusCode::BAD_REQUEST => PaymentsServiceError::VerificationRejected,
                StatusCode::SERVICE_UNAVAILABLE => PaymentsServiceError::Unavailable,
                _ => PaymentsServiceError::UnexpectedResponse(detail),
            });
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Open a gateway transaction for an already-created order.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsServiceError::Unavailable`] when the gateway is not
    /// configured on the platform.
    async fn create_gateway_session(
        &self,
        amount: Paise,
        order_id: Uuid,
    ) -> Result<GatewaySession, PaymentsServiceError>;

    /// Verify a completed charge's signature against the internal order.
    async fn verify(
        &self,
        triple: SignatureTriple,
        internal_order_id: Uuid,
    ) -> Result<(), PaymentsServiceError>;
}

/// The external checkout surface. Control passes to the provider until the
/// customer completes or dismisses it; no timeout or cancellation token
/// governs the wait.
#[automock]
#[async_trait]
pub trait GatewayCheckout: Send + Sync {
    /// Hand the session to the provider and wait for its outcome.
    async fn collect(&self, session: GatewaySession) -> GatewayOutcome;
}

/// Gateway surface for headless contexts: with nobody to show a checkout
/// to, every collection attempt reports a dismissal.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnattendedGateway;

#[async_trait]
impl GatewayCheckout for UnattendedGateway {
    async fn collect(&self, _session: GatewaySession) -> GatewayOutcome {
        GatewayOutcome::Dismissed
    }
}
