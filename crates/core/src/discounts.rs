//! Discount arithmetic
//!
//! Percentage and fixed-amount discount calculations over minor-unit
//! amounts, shared by coupon application and checkout totals.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

use crate::prices::Paise;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// An amount exceeded the representable minor-unit range.
    #[error("amount exceeds the representable range")]
    AmountOverflow,
}

/// How a coupon reduces the order value.
#[derive(Debug, Clone, Copy)]
pub enum CouponDiscount {
    /// Take a percentage off the subtotal, optionally capped.
    PercentageOff {
        /// Fraction of the subtotal to discount (`0.2` is 20%).
        percent: Percentage,

        /// Upper bound on the discount amount, if any.
        max_discount: Option<Paise>,
    },

    /// Take a fixed amount off the subtotal.
    FixedAmountOff {
        /// Amount to subtract.
        amount: Paise,
    },
}

impl CouponDiscount {
    /// Discount amount for the given subtotal.
    ///
    /// A fixed discount is clamped to the subtotal so a coupon worth more
    /// than the order can never produce a negative total on its own. A
    /// percentage discount honours `max_discount` when present.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] when percentage arithmetic overflows or an
    /// amount cannot be represented in minor units.
    pub fn amount_for(&self, subtotal: Paise) -> Result<Paise, DiscountError> {
        match self {
            Self::FixedAmountOff { amount } => Ok((*amount).min(subtotal)),
            Self::PercentageOff {
                percent,
                max_discount,
            } => {
                let minor =
                    i64::try_from(subtotal.value()).map_err(|_| DiscountError::AmountOverflow)?;

                let raw = percent_of_minor(percent, minor)?;

                let mut discount =
                    u64::try_from(raw).map_err(|_| DiscountError::AmountOverflow)?;

                if let Some(cap) = max_discount {
                    discount = discount.min(cap.value());
                }

                Ok(Paise::new(discount))
            }
        }
    }
}

/// Calculates `percent` of a minor-unit amount, rounded midpoint-away-from-zero
/// to whole minor units.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] when the multiplication
/// overflows or the result cannot be safely represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}
