//! Coupons service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use storefront::{coupons::canonical_code, prices::Paise};

use crate::{
    api::{ApiClient, error_detail, paise_to_rupees, rupees_to_paise},
    domain::coupons::{
        errors::CouponsServiceError,
        models::{AppliedCoupon, DiscountKind},
    },
};

#[derive(Debug, Clone)]
pub struct HttpCouponsService {
    api: ApiClient,
}

impl HttpCouponsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[derive(Debug, Deserialize)]
struct ValidateCouponResponse {
    code: String,
    discount: f64,
    discount_type: DiscountKind,
}

#[async_trait]
impl CouponsService for HttpCouponsService {
    async fn validate(
        &self,
        code: String,
        subtotal: Paise,
    ) -> Result<AppliedCoupon, CouponsServiceError> {
        let code = canonical_code(&code);

        let response = self
            .api
            .get(&format!("/coupons/validate/{code}"))
            .query(&[("order_amount", paise_to_rupees(subtotal))])
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, detail) = error_detail(response).await;

            return Err(match status {
                StatusCode::NOT_FOUND => CouponsServiceError::NotFound,
                StatusCode::BAD_REQUEST => CouponsServiceError::Rejected(detail),
                _ => CouponsServiceError::UnexpectedResponse(detail),
            });
        }

        let parsed: ValidateCouponResponse = response.json().await?;
        let applied = applied_from_wire(parsed, subtotal);

        debug!(code = %applied.code, discount = *applied.discount, "coupon validated");

        Ok(applied)
    }
}

/// Converts the platform's validation response into an applied coupon.
///
/// Fixed discounts are clamped to the subtotal on this side too, so a
/// misbehaving backend can never push the order total negative.
fn applied_from_wire(response: ValidateCouponResponse, subtotal: Paise) -> AppliedCoupon {
    let mut discount = rupees_to_paise(response.discount);

    if response.discount_type == DiscountKind::Fixed {
        discount = discount.min(subtotal);
    }

    AppliedCoupon {
        code: response.code,
        discount,
        kind: response.discount_type,
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Validate a code against the current order subtotal.
    ///
    /// Validation never consumes a redemption; the platform only increments
    /// a coupon's use count when an order is created with it.
    async fn validate(
        &self,
        code: String,
        subtotal: Paise,
    ) -> Result<AppliedCoupon, CouponsServiceError>;
}
