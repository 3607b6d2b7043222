//! Checkout totals
//!
//! The fee and tax calculator: a pure function from subtotal, applied
//! discount and the platform GST rate to the amount the customer pays.

use decimal_percentage::Percentage;

use crate::{
    discounts::{DiscountError, percent_of_minor},
    prices::Paise,
};

/// Orders with a subtotal strictly above this threshold ship free.
pub const FREE_SHIPPING_THRESHOLD: Paise = Paise::from_rupees(500);

/// Flat shipping fee charged below the free-shipping threshold.
pub const SHIPPING_FEE: Paise = Paise::from_rupees(50);

/// The priced breakdown of a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum of line totals before shipping, tax or discount.
    pub subtotal: Paise,

    /// Shipping charge, zero above the free-shipping threshold.
    pub shipping: Paise,

    /// GST on the subtotal.
    pub gst: Paise,

    /// Coupon discount applied.
    pub discount: Paise,

    /// Amount payable: subtotal + shipping + GST − discount, floored at zero.
    pub total: Paise,
}

/// Shipping fee for the given subtotal.
#[must_use]
pub fn shipping_fee(subtotal: Paise) -> Paise {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        Paise::new(0)
    } else {
        SHIPPING_FEE
    }
}

/// Computes checkout totals.
///
/// A discount larger than subtotal + shipping + GST floors the total at zero
/// rather than going negative.
///
/// # Errors
///
/// Returns a [`DiscountError`] when GST arithmetic overflows.
pub fn compute_totals(
    subtotal: Paise,
    discount: Paise,
    gst: &Percentage,
) -> Result<Totals, DiscountError> {
    let shipping = shipping_fee(subtotal);

    let minor = i64::try_from(subtotal.value()).map_err(|_| DiscountError::AmountOverflow)?;
    let gst_amount = percent_of_minor(gst, minor)?;
    let gst_amount = u64::try_from(gst_amount).map_err(|_| DiscountError::AmountOverflow)?;

    let gross = subtotal
        .value()
        .saturating_add(shipping.value())
        .saturating_add(gst_amount);

    let total = gross.saturating_sub(discount.value());

    Ok(Totals {
        subtotal,
        shipping,
        gst: Paise::new(gst_amount),
        discount,
        total: Paise::new(total),
    })
}
