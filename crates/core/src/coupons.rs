//! Coupons
//!
//! Coupon applicability rules and discount resolution. Codes are
//! case-insensitive and canonicalised to uppercase before any comparison.

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    discounts::{CouponDiscount, DiscountError},
    prices::Paise,
};

/// Canonical form of a coupon code: trimmed and uppercased.
#[must_use]
pub fn canonical_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// A marketplace coupon as administered by the platform.
#[derive(Debug, Clone)]
pub struct Coupon {
    /// Unique code, stored in canonical uppercase form.
    pub code: String,

    /// How the coupon discounts the order.
    pub discount: CouponDiscount,

    /// Minimum order subtotal for the coupon to apply.
    pub min_order: Paise,

    /// Start of the validity window.
    pub valid_from: Timestamp,

    /// End of the validity window.
    pub valid_until: Timestamp,

    /// Maximum number of redemptions, if bounded.
    pub usage_limit: Option<u32>,

    /// Redemptions so far. Incremented by the order service at order
    /// creation, never at validation.
    pub used_count: u32,

    /// Whether the coupon is currently enabled.
    pub is_active: bool,
}

/// Why a coupon failed to apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponRejection {
    /// The coupon is disabled.
    #[error("coupon not found or inactive")]
    Inactive,

    /// The current time is outside `[valid_from, valid_until]`.
    #[error("coupon has expired or is not yet valid")]
    OutsideValidityWindow,

    /// The order subtotal is below the coupon's minimum.
    #[error("minimum order amount is {0}")]
    BelowMinimumOrder(Paise),

    /// Every permitted redemption has been used.
    #[error("coupon usage limit reached")]
    UsageLimitReached,
}

/// Errors from resolving a coupon discount.
#[derive(Debug, Error)]
pub enum CouponError {
    /// The coupon does not apply to this order.
    #[error(transparent)]
    Rejected(#[from] CouponRejection),

    /// Discount arithmetic failed.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

impl Coupon {
    /// Checks whether this coupon applies to an order with the given
    /// subtotal at `now`.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`CouponRejection`], checked in the same
    /// order the platform checks them: active flag, validity window, minimum
    /// order, usage limit.
    pub fn applicability(&self, subtotal: Paise, now: Timestamp) -> Result<(), CouponRejection> {
        if !self.is_active {
            return Err(CouponRejection::Inactive);
        }

        if now < self.valid_from || now > self.valid_until {
            return Err(CouponRejection::OutsideValidityWindow);
        }

        if subtotal < self.min_order {
            return Err(CouponRejection::BelowMinimumOrder(self.min_order));
        }

        if let Some(limit) = self.usage_limit
            && self.used_count >= limit
        {
            return Err(CouponRejection::UsageLimitReached);
        }

        Ok(())
    }

    /// Resolves the discount amount for an applicable coupon.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::Rejected`] when the coupon does not apply and
    /// [`CouponError::Discount`] when discount arithmetic fails.
    pub fn discount_for(&self, subtotal: Paise, now: Timestamp) -> Result<Paise, CouponError> {
        self.applicability(subtotal, now)?;

        Ok(self.discount.amount_for(subtotal)?)
    }
}
