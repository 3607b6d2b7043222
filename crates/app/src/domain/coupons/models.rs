//! Coupon Models

use serde::{Deserialize, Serialize};

use storefront::prices::Paise;

/// Discount type as reported by the coupon service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

/// A coupon validated against the current order subtotal.
///
/// The discount is resolved by the platform at validation time; removing an
/// applied coupon is purely session-local, since redemptions are only
/// counted at order creation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedCoupon {
    pub code: String,
    pub discount: Paise,
    pub kind: DiscountKind,
}
