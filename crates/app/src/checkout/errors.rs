//! Checkout errors.

use thiserror::Error;

use storefront::discounts::DiscountError;

use crate::domain::{
    addresses::AddressesServiceError, cart::CartStoreError, coupons::CouponsServiceError,
    orders::OrdersServiceError, payments::PaymentsServiceError,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A delivery address must be selected first.
    #[error("select a delivery address")]
    SelectAddress,

    /// There is nothing to order.
    #[error("your cart is empty")]
    EmptyCart,

    /// The requested operation does not belong to the session's current
    /// state.
    #[error("checkout step out of order")]
    OutOfStep,

    /// Online payment is not configured on the platform; the session has
    /// been switched to cash on delivery.
    #[error("online payment is not available; please use cash on delivery")]
    GatewayUnavailable,

    /// The customer dismissed the payment surface.
    #[error("payment cancelled")]
    PaymentCancelled,

    /// The gateway reported a failed charge.
    #[error("payment failed: {0}")]
    PaymentFailed(String),

    /// The charge went through but could not be verified. Money may have
    /// moved without a confirmed order; this must reach the customer as a
    /// persistent, support-escalation message.
    #[error("payment succeeded but verification failed; contact support")]
    VerificationFailed,

    /// The cart store's lock was poisoned by an earlier panic.
    #[error("cart store unavailable")]
    CartUnavailable,

    #[error(transparent)]
    Cart(#[from] CartStoreError),

    #[error(transparent)]
    Coupons(#[from] CouponsServiceError),

    #[error(transparent)]
    Addresses(#[from] AddressesServiceError),

    #[error(transparent)]
    Orders(#[from] OrdersServiceError),

    #[error(transparent)]
    Payments(PaymentsServiceError),

    #[error(transparent)]
    Pricing(#[from] DiscountError),
}
