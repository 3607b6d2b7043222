//! Checkout session

use uuid::Uuid;

use crate::domain::{
    coupons::AppliedCoupon, payments::PaymentMethod, settings::PlatformSettings,
};

/// Where a checkout attempt currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// Choosing a delivery address.
    AddressSelection,

    /// Choosing a payment method; the order can be placed from here.
    PaymentSelection,

    /// An order placement is in flight. Exactly one operation is pending at
    /// a time.
    Placing,

    /// The order is placed and the cart cleared. Terminal.
    Completed,
}

/// Ephemeral state for one checkout attempt.
///
/// Created when checkout starts and discarded when the customer navigates
/// away or the order completes. The platform settings snapshot taken at
/// creation is used for every pricing computation in the attempt; rates
/// changed by an admin mid-flow apply only to the next attempt.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    state: CheckoutState,
    settings: PlatformSettings,
    selected_address: Option<Uuid>,
    payment_method: PaymentMethod,
    applied_coupon: Option<AppliedCoupon>,
    gateway_available: bool,
    pending_order: Option<Uuid>,
}

impl CheckoutSession {
    /// Creates a fresh session in [`CheckoutState::AddressSelection`].
    #[must_use]
    pub fn new(settings: PlatformSettings) -> Self {
        Self {
            state: CheckoutState::AddressSelection,
            settings,
            selected_address: None,
            payment_method: PaymentMethod::default(),
            applied_coupon: None,
            gateway_available: true,
            pending_order: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// The settings snapshot this attempt prices against.
    #[must_use]
    pub fn settings(&self) -> &PlatformSettings {
        &self.settings
    }

    /// Selected delivery address, if any.
    #[must_use]
    pub fn selected_address(&self) -> Option<Uuid> {
        self.selected_address
    }

    /// Selected payment method. Defaults to cash on delivery.
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// The coupon currently applied, if any.
    #[must_use]
    pub fn applied_coupon(&self) -> Option<&AppliedCoupon> {
        self.applied_coupon.as_ref()
    }

    /// Whether online payment methods are selectable.
    #[must_use]
    pub fn gateway_available(&self) -> bool {
        self.gateway_available
    }

    /// The order created by an earlier placement attempt in this session,
    /// kept so a retry never creates a duplicate.
    #[must_use]
    pub fn pending_order(&self) -> Option<Uuid> {
        self.pending_order
    }

    pub(crate) fn set_state(&mut self, state: CheckoutState) {
        self.state = state;
    }

    pub(crate) fn set_selected_address(&mut self, address: Option<Uuid>) {
        self.selected_address = address;
    }

    pub(crate) fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub(crate) fn set_applied_coupon(&mut self, coupon: Option<AppliedCoupon>) {
        self.applied_coupon = coupon;
    }

    pub(crate) fn set_pending_order(&mut self, order: Option<Uuid>) {
        self.pending_order = order;
    }

    /// Disables every gateway-backed method and falls back to cash on
    /// delivery.
    pub(crate) fn force_cod(&mut self) {
        self.gateway_available = false;
        self.payment_method = PaymentMethod::Cod;
    }
}
