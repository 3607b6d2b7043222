//! Checkout orchestrator.
//!
//! Drives one checkout attempt through its states. Network calls run one at
//! a time in a fixed sequence (create order, open gateway session, verify);
//! any failure returns the session to where it was and surfaces a message.
//! Nothing here retries automatically; every retry is a fresh user action.

use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use storefront::{
    items::LineItem,
    prices::Paise,
    totals::{Totals, compute_totals},
};

use crate::{
    checkout::{
        errors::CheckoutError,
        session::{CheckoutSession, CheckoutState},
    },
    domain::{
        addresses::{Address, AddressesService, preselected},
        cart::CartStore,
        coupons::{AppliedCoupon, CouponsService},
        orders::{NewOrder, OrdersService, ShippingAddress},
        payments::{GatewayCheckout, GatewayOutcome, PaymentMethod, PaymentsService, PaymentsServiceError},
        settings::{PlatformSettings, SettingsService},
    },
};

/// The result of a completed checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedOrder {
    /// The order the platform created.
    pub order_id: Uuid,

    /// The totals the order was placed with.
    pub totals: Totals,
}

/// Checkout orchestrator.
pub struct Checkout {
    cart: Arc<Mutex<CartStore>>,
    addresses: Arc<dyn AddressesService>,
    coupons: Arc<dyn CouponsService>,
    orders: Arc<dyn OrdersService>,
    payments: Arc<dyn PaymentsService>,
    gateway: Arc<dyn GatewayCheckout>,
    settings: Arc<dyn SettingsService>,
}

impl Checkout {
    /// Wires the orchestrator to its collaborating services.
    #[must_use]
    pub fn new(
        cart: Arc<Mutex<CartStore>>,
        addresses: Arc<dyn AddressesService>,
        coupons: Arc<dyn CouponsService>,
        orders: Arc<dyn OrdersService>,
        payments: Arc<dyn PaymentsService>,
        gateway: Arc<dyn GatewayCheckout>,
        settings: Arc<dyn SettingsService>,
    ) -> Self {
        Self {
            cart,
            addresses,
            coupons,
            orders,
            payments,
            gateway,
            settings,
        }
    }

    /// Starts a checkout attempt.
    ///
    /// Takes the platform settings snapshot the whole attempt will price
    /// against, and preselects the customer's default address. Either fetch
    /// failing degrades gracefully: defaults rates, no preselection.
    pub async fn begin(&self) -> CheckoutSession {
        let settings = match self.settings.fetch().await {
            Ok(settings) => settings,
            Err(error) => {
                warn!("falling back to default platform rates: {error}");

                PlatformSettings::default()
            }
        };

        let mut session = CheckoutSession::new(settings);

        match self.addresses.list().await {
            Ok(addresses) => {
                session.set_selected_address(preselected(&addresses).map(|a| a.id));
            }
            Err(error) => warn!("could not load saved addresses: {error}"),
        }

        session
    }

    /// Selects the delivery address.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::OutOfStep`] outside address selection.
    pub fn select_address(
        &self,
        session: &mut CheckoutSession,
        address: Uuid,
    ) -> Result<(), CheckoutError> {
        if session.state() != CheckoutState::AddressSelection {
            return Err(CheckoutError::OutOfStep);
        }

        session.set_selected_address(Some(address));

        Ok(())
    }

    /// Moves from address selection to payment selection.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::SelectAddress`] when no address is selected;
    /// the session stays where it is.
    pub fn continue_to_payment(&self, session: &mut CheckoutSession) -> Result<(), CheckoutError> {
        if session.state() != CheckoutState::AddressSelection {
            return Err(CheckoutError::OutOfStep);
        }

        if session.selected_address().is_none() {
            return Err(CheckoutError::SelectAddress);
        }

        session.set_state(CheckoutState::PaymentSelection);

        Ok(())
    }

    /// Returns from payment selection to address selection.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::OutOfStep`] outside payment selection.
    pub fn back_to_address(&self, session: &mut CheckoutSession) -> Result<(), CheckoutError> {
        if session.state() != CheckoutState::PaymentSelection {
            return Err(CheckoutError::OutOfStep);
        }

        session.set_state(CheckoutState::AddressSelection);

        Ok(())
    }

    /// Selects how the customer pays.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::GatewayUnavailable`] when an online method
    /// is chosen while the gateway is down; the selection is unchanged.
    pub fn select_payment_method(
        &self,
        session: &mut CheckoutSession,
        method: PaymentMethod,
    ) -> Result<(), CheckoutError> {
        if session.state() != CheckoutState::PaymentSelection {
            return Err(CheckoutError::OutOfStep);
        }

        if method.is_online() && !session.gateway_available() {
            return Err(CheckoutError::GatewayUnavailable);
        }

        session.set_payment_method(method);

        Ok(())
    }

    /// Validates a coupon against the current cart subtotal and applies it
    /// to the session.
    ///
    /// # Errors
    ///
    /// Surfaces the coupon service's rejection; the session keeps whatever
    /// coupon it had.
    pub async fn apply_coupon(
        &self,
        session: &mut CheckoutSession,
        code: &str,
    ) -> Result<AppliedCoupon, CheckoutError> {
        if matches!(
            session.state(),
            CheckoutState::Placing | CheckoutState::Completed
        ) {
            return Err(CheckoutError::OutOfStep);
        }

        let subtotal = self.lock_cart()?.subtotal();

        let applied = self.coupons.validate(code.to_owned(), subtotal).await?;

        session.set_applied_coupon(Some(applied.clone()));

        Ok(applied)
    }

    /// Removes the applied coupon. Session-local; the platform only counts
    /// redemptions at order creation, so nothing is released remotely.
    pub fn remove_coupon(&self, session: &mut CheckoutSession) {
        session.set_applied_coupon(None);
    }

    /// Prices the current cart under the session's settings snapshot and
    /// applied coupon.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart store is unavailable or pricing
    /// arithmetic overflows.
    pub fn totals(&self, session: &CheckoutSession) -> Result<Totals, CheckoutError> {
        let subtotal = self.lock_cart()?.subtotal();

        let discount = session
            .applied_coupon()
            .map(|coupon| coupon.discount)
            .unwrap_or_default();

        Ok(compute_totals(subtotal, discount, &session.settings().gst())?)
    }

    /// Places the order.
    ///
    /// Creates the order first, then (for online methods) runs the gateway
    /// round trip. An order created by a failed attempt is kept on the
    /// session and reused by the next attempt, so one checkout never creates
    /// two orders. On success the session completes and the cart is cleared;
    /// on any failure it returns to payment selection.
    ///
    /// # Errors
    ///
    /// See [`CheckoutError`]; [`CheckoutError::VerificationFailed`] is the
    /// critical case where a charge succeeded but could not be verified.
    pub async fn place_order(
        &self,
        session: &mut CheckoutSession,
    ) -> Result<PlacedOrder, CheckoutError> {
        if session.state() != CheckoutState::PaymentSelection {
            return Err(CheckoutError::OutOfStep);
        }

        let address_id = session.selected_address().ok_or(CheckoutError::SelectAddress)?;

        let (items, subtotal) = {
            let cart = self.lock_cart()?;

            if cart.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }

            (cart.items().to_vec(), cart.subtotal())
        };

        let discount = session
            .applied_coupon()
            .map(|coupon| coupon.discount)
            .unwrap_or_default();

        let totals = compute_totals(subtotal, discount, &session.settings().gst())?;

        session.set_state(CheckoutState::Placing);

        match self.run_placement(session, address_id, items, totals.total).await {
            Ok(order_id) => {
                self.lock_cart()?.clear()?;

                session.set_pending_order(None);
                session.set_state(CheckoutState::Completed);

                info!(%order_id, total = %totals.total, "checkout completed");

                Ok(PlacedOrder { order_id, totals })
            }
            Err(error) => {
                session.set_state(CheckoutState::PaymentSelection);

                Err(error)
            }
        }
    }

    /// The serialized create-order, create-gateway-session, verify sequence.
    async fn run_placement(
        &self,
        session: &mut CheckoutSession,
        address_id: Uuid,
        items: Vec<LineItem>,
        total: Paise,
    ) -> Result<Uuid, CheckoutError> {
        let order_id = match session.pending_order() {
            Some(order_id) => {
                debug!(%order_id, "reusing order from an earlier attempt");

                order_id
            }
            None => {
                let address = self.resolve_address(address_id).await?;

                let order = self
                    .orders
                    .create(NewOrder {
                        items,
                        total,
                        shipping_address: ShippingAddress::from(&address),
                    })
                    .await?;

                session.set_pending_order(Some(order.id));

                order.id
            }
        };

        if !session.payment_method().is_online() {
            return Ok(order_id);
        }

        let gateway_session = match self.payments.create_gateway_session(total, order_id).await {
            Ok(gateway_session) => gateway_session,
            Err(PaymentsServiceError::Unavailable) => {
                warn!("payment gateway unavailable; falling back to cash on delivery");

                session.force_cod();

                return Err(CheckoutError::GatewayUnavailable);
            }
            Err(error) => return Err(CheckoutError::Payments(error)),
        };

        match self.gateway.collect(gateway_session).await {
            GatewayOutcome::Completed(triple) => {
                if let Err(error) = self.payments.verify(triple, order_id).await {
                    error!(%order_id, "verification failed after a successful charge: {error}");

                    return Err(CheckoutError::VerificationFailed);
                }

                Ok(order_id)
            }
            GatewayOutcome::Dismissed => Err(CheckoutError::PaymentCancelled),
            GatewayOutcome::Failed(reason) => Err(CheckoutError::PaymentFailed(reason)),
        }
    }

    async fn resolve_address(&self, address_id: Uuid) -> Result<Address, CheckoutError> {
        self.addresses
            .list()
            .await?
            .into_iter()
            .find(|address| address.id == address_id)
            .ok_or(CheckoutError::SelectAddress)
    }

    fn lock_cart(&self) -> Result<std::sync::MutexGuard<'_, CartStore>, CheckoutError> {
        self.cart.lock().map_err(|_| CheckoutError::CartUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use testresult::TestResult;

    use storefront::variants::Variant;

    use crate::{
        domain::{
            addresses::{AddressType, AddressesServiceError, MockAddressesService},
            coupons::{CouponsServiceError, DiscountKind, MockCouponsService},
            orders::{MockOrdersService, Order},
            payments::{GatewaySession, MockGatewayCheckout, MockPaymentsService, SignatureTriple},
            settings::{MockSettingsService, SettingsServiceError},
        },
        store::{ClientStateStore, MockClientStateStore},
    };

    use super::*;

    fn empty_state_store() -> Arc<dyn ClientStateStore> {
        let mut store = MockClientStateStore::new();

        store.expect_load().returning(|_| Ok(None));
        store.expect_save().returning(|_, _| Ok(()));

        Arc::new(store)
    }

    fn line(product: Uuid, size: &str, rupees: u64, quantity: u32) -> LineItem {
        LineItem::new(
            product,
            Uuid::now_v7(),
            "Kurta",
            Paise::from_rupees(rupees),
            Variant::new(Some(size), None),
            quantity,
        )
    }

    fn cart_with(items: Vec<LineItem>) -> Arc<Mutex<CartStore>> {
        let mut cart = CartStore::open(empty_state_store()).expect("cart should open");

        for item in items {
            cart.add(item).expect("add should persist");
        }

        Arc::new(Mutex::new(cart))
    }

    fn address(id: Uuid, is_default: bool) -> Address {
        Address {
            id,
            name: "Asha Rao".into(),
            phone: "9876543210".into(),
            pincode: "560001".into(),
            address_line1: "12 MG Road".into(),
            address_line2: None,
            city: "Bengaluru".into(),
            state: "Karnataka".into(),
            landmark: None,
            address_type: AddressType::Home,
            is_default,
        }
    }

    fn triple() -> SignatureTriple {
        SignatureTriple {
            gateway_order_id: "order_gw_1".into(),
            payment_id: "pay_1".into(),
            signature: "sig".into(),
        }
    }

    fn gateway_session_for(order_id: Uuid, amount: Paise) -> GatewaySession {
        GatewaySession {
            gateway_order_id: "order_gw_1".into(),
            key_id: "rzp_test_key".into(),
            amount,
            currency: "INR".into(),
            internal_order_id: order_id,
        }
    }

    /// Mock bundle with benign defaults for the services a test does not
    /// exercise.
    struct Services {
        addresses: MockAddressesService,
        coupons: MockCouponsService,
        orders: MockOrdersService,
        payments: MockPaymentsService,
        gateway: MockGatewayCheckout,
        settings: MockSettingsService,
    }

    impl Services {
        fn new() -> Self {
            let mut settings = MockSettingsService::new();
            settings
                .expect_fetch()
                .returning(|| Ok(PlatformSettings::default()));

            Self {
                addresses: MockAddressesService::new(),
                coupons: MockCouponsService::new(),
                orders: MockOrdersService::new(),
                payments: MockPaymentsService::new(),
                gateway: MockGatewayCheckout::new(),
                settings,
            }
        }

        fn with_address(mut self, id: Uuid) -> Self {
            self.addresses
                .expect_list()
                .returning(move || Ok(vec![address(id, true)]));

            self
        }

        fn into_checkout(self, cart: Arc<Mutex<CartStore>>) -> Checkout {
            Checkout::new(
                cart,
                Arc::new(self.addresses),
                Arc::new(self.coupons),
                Arc::new(self.orders),
                Arc::new(self.payments),
                Arc::new(self.gateway),
                Arc::new(self.settings),
            )
        }
    }

    /// A session advanced to payment selection with the given address.
    async fn session_at_payment(checkout: &Checkout, address_id: Uuid) -> CheckoutSession {
        let mut session = checkout.begin().await;

        assert_eq!(session.selected_address(), Some(address_id));

        checkout
            .continue_to_payment(&mut session)
            .expect("address is preselected");

        session
    }

    #[tokio::test]
    async fn begin_preselects_the_default_address() {
        let address_id = Uuid::now_v7();
        let services = Services::new().with_address(address_id);
        let checkout = services.into_checkout(cart_with(vec![]));

        let session = checkout.begin().await;

        assert_eq!(session.state(), CheckoutState::AddressSelection);
        assert_eq!(session.selected_address(), Some(address_id));
        assert_eq!(session.payment_method(), PaymentMethod::Cod);
        assert!(session.gateway_available());
    }

    #[tokio::test]
    async fn begin_survives_settings_and_address_failures() {
        let mut services = Services::new();

        services.settings.checkpoint();
        services.settings.expect_fetch().returning(|| {
            Err(SettingsServiceError::UnexpectedResponse("down".into()))
        });
        services
            .addresses
            .expect_list()
            .returning(|| Err(AddressesServiceError::UnexpectedResponse("down".into())));

        let checkout = services.into_checkout(cart_with(vec![]));

        let session = checkout.begin().await;

        assert_eq!(session.settings(), &PlatformSettings::default());
        assert_eq!(session.selected_address(), None);
    }

    #[tokio::test]
    async fn continue_to_payment_requires_an_address() {
        let mut services = Services::new();
        services.addresses.expect_list().returning(|| Ok(vec![]));

        let checkout = services.into_checkout(cart_with(vec![]));
        let mut session = checkout.begin().await;

        let result = checkout.continue_to_payment(&mut session);

        assert!(matches!(result, Err(CheckoutError::SelectAddress)));
        assert_eq!(session.state(), CheckoutState::AddressSelection);
    }

    #[tokio::test]
    async fn cod_checkout_creates_one_order_and_clears_the_cart() -> TestResult {
        let address_id = Uuid::now_v7();
        let product = Uuid::now_v7();
        let order_id = Uuid::now_v7();

        // two sizes of the same product stay distinct lines
        let cart = cart_with(vec![
            line(product, "M", 300, 1),
            line(product, "L", 300, 1),
        ]);

        let mut services = Services::new().with_address(address_id);

        services
            .orders
            .expect_create()
            .once()
            .withf(|order| {
                order.items.len() == 2 && order.total == Paise::from_rupees(708)
            })
            .returning(move |_| {
                Ok(Order {
                    id: order_id,
                    total: Paise::from_rupees(708),
                    status: "pending".into(),
                })
            });

        let checkout = services.into_checkout(cart.clone());
        let mut session = session_at_payment(&checkout, address_id).await;

        let placed = checkout.place_order(&mut session).await?;

        assert_eq!(placed.order_id, order_id);
        assert_eq!(placed.totals.total, Paise::from_rupees(708));
        assert_eq!(session.state(), CheckoutState::Completed);
        assert!(cart.lock().expect("cart lock").is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn gateway_unavailable_forces_cash_on_delivery() -> TestResult {
        let address_id = Uuid::now_v7();
        let order_id = Uuid::now_v7();

        let cart = cart_with(vec![line(Uuid::now_v7(), "M", 600, 1)]);

        let mut services = Services::new().with_address(address_id);

        services.orders.expect_create().once().returning(move |_| {
            Ok(Order {
                id: order_id,
                total: Paise::from_rupees(708),
                status: "pending".into(),
            })
        });

        services
            .payments
            .expect_create_gateway_session()
            .once()
            .returning(|_, _| Err(PaymentsServiceError::Unavailable));

        let checkout = services.into_checkout(cart.clone());
        let mut session = session_at_payment(&checkout, address_id).await;

        checkout.select_payment_method(&mut session, PaymentMethod::Card)?;

        let result = checkout.place_order(&mut session).await;

        assert!(matches!(result, Err(CheckoutError::GatewayUnavailable)));
        assert_eq!(session.state(), CheckoutState::PaymentSelection);
        assert_eq!(session.payment_method(), PaymentMethod::Cod);
        assert!(!session.gateway_available());
        assert!(!cart.lock().expect("cart lock").is_empty());

        // online methods are no longer selectable
        let reselect = checkout.select_payment_method(&mut session, PaymentMethod::Upi);
        assert!(matches!(reselect, Err(CheckoutError::GatewayUnavailable)));

        // retrying as COD completes without creating a second order
        let placed = checkout.place_order(&mut session).await?;

        assert_eq!(placed.order_id, order_id);
        assert_eq!(session.state(), CheckoutState::Completed);

        Ok(())
    }

    #[tokio::test]
    async fn dismissed_gateway_keeps_the_order_for_retry() -> TestResult {
        let address_id = Uuid::now_v7();
        let order_id = Uuid::now_v7();
        let total = Paise::from_rupees(708);

        let cart = cart_with(vec![line(Uuid::now_v7(), "M", 600, 1)]);

        let mut services = Services::new().with_address(address_id);

        services.orders.expect_create().once().returning(move |_| {
            Ok(Order {
                id: order_id,
                total,
                status: "pending".into(),
            })
        });

        services
            .payments
            .expect_create_gateway_session()
            .times(2)
            .withf(move |amount, order| *amount == total && *order == order_id)
            .returning(move |amount, order| Ok(gateway_session_for(order, amount)));

        let mut seq = Sequence::new();

        services
            .gateway
            .expect_collect()
            .once()
            .in_sequence(&mut seq)
            .returning(|_| GatewayOutcome::Dismissed);

        services
            .gateway
            .expect_collect()
            .once()
            .in_sequence(&mut seq)
            .returning(|_| GatewayOutcome::Completed(triple()));

        services
            .payments
            .expect_verify()
            .once()
            .withf(move |_, order| *order == order_id)
            .returning(|_, _| Ok(()));

        let checkout = services.into_checkout(cart.clone());
        let mut session = session_at_payment(&checkout, address_id).await;

        checkout.select_payment_method(&mut session, PaymentMethod::Upi)?;

        let first = checkout.place_order(&mut session).await;

        assert!(matches!(first, Err(CheckoutError::PaymentCancelled)));
        assert_eq!(session.state(), CheckoutState::PaymentSelection);
        assert_eq!(session.pending_order(), Some(order_id));
        assert!(!cart.lock().expect("cart lock").is_empty());

        let placed = checkout.place_order(&mut session).await?;

        assert_eq!(placed.order_id, order_id);
        assert_eq!(session.state(), CheckoutState::Completed);
        assert!(cart.lock().expect("cart lock").is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn verification_failure_is_surfaced_and_nothing_is_cleared() -> TestResult {
        let address_id = Uuid::now_v7();
        let order_id = Uuid::now_v7();

        let cart = cart_with(vec![line(Uuid::now_v7(), "M", 600, 1)]);

        let mut services = Services::new().with_address(address_id);

        services.orders.expect_create().once().returning(move |_| {
            Ok(Order {
                id: order_id,
                total: Paise::from_rupees(708),
                status: "pending".into(),
            })
        });

        services
            .payments
            .expect_create_gateway_session()
            .once()
            .returning(move |amount, order| Ok(gateway_session_for(order, amount)));

        services
            .gateway
            .expect_collect()
            .once()
            .returning(|_| GatewayOutcome::Completed(triple()));

        services
            .payments
            .expect_verify()
            .once()
            .returning(|_, _| Err(PaymentsServiceError::VerificationRejected));

        let checkout = services.into_checkout(cart.clone());
        let mut session = session_at_payment(&checkout, address_id).await;

        checkout.select_payment_method(&mut session, PaymentMethod::Card)?;

        let result = checkout.place_order(&mut session).await;

        assert!(matches!(result, Err(CheckoutError::VerificationFailed)));
        assert_eq!(session.state(), CheckoutState::PaymentSelection);
        assert!(!cart.lock().expect("cart lock").is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn failed_charge_surfaces_the_gateway_reason() -> TestResult {
        let address_id = Uuid::now_v7();
        let order_id = Uuid::now_v7();

        let cart = cart_with(vec![line(Uuid::now_v7(), "M", 600, 1)]);

        let mut services = Services::new().with_address(address_id);

        services.orders.expect_create().once().returning(move |_| {
            Ok(Order {
                id: order_id,
                total: Paise::from_rupees(708),
                status: "pending".into(),
            })
        });

        services
            .payments
            .expect_create_gateway_session()
            .once()
            .returning(move |amount, order| Ok(gateway_session_for(order, amount)));

        services
            .gateway
            .expect_collect()
            .once()
            .returning(|_| GatewayOutcome::Failed("card declined".into()));

        let checkout = services.into_checkout(cart);
        let mut session = session_at_payment(&checkout, address_id).await;

        checkout.select_payment_method(&mut session, PaymentMethod::Netbanking)?;

        let result = checkout.place_order(&mut session).await;

        assert!(
            matches!(result, Err(CheckoutError::PaymentFailed(ref reason)) if reason == "card declined"),
            "expected PaymentFailed, got {result:?}"
        );
        assert_eq!(session.state(), CheckoutState::PaymentSelection);

        Ok(())
    }

    #[tokio::test]
    async fn coupon_discount_flows_into_totals_and_removal_resets_it() -> TestResult {
        let address_id = Uuid::now_v7();

        let cart = cart_with(vec![line(Uuid::now_v7(), "M", 1_000, 1)]);

        let mut services = Services::new().with_address(address_id);

        services
            .coupons
            .expect_validate()
            .once()
            .withf(|code, subtotal| code == "SAVE20" && *subtotal == Paise::from_rupees(1_000))
            .returning(|_, _| {
                Ok(AppliedCoupon {
                    code: "SAVE20".into(),
                    discount: Paise::from_rupees(150),
                    kind: DiscountKind::Percentage,
                })
            });

        let checkout = services.into_checkout(cart);
        let mut session = checkout.begin().await;

        checkout.apply_coupon(&mut session, "SAVE20").await?;

        let totals = checkout.totals(&session)?;

        // 1000 + 0 shipping + 180 gst - 150 coupon
        assert_eq!(totals.discount, Paise::from_rupees(150));
        assert_eq!(totals.total, Paise::from_rupees(1_030));

        checkout.remove_coupon(&mut session);

        let totals = checkout.totals(&session)?;

        assert_eq!(totals.discount, Paise::new(0));
        assert_eq!(totals.total, Paise::from_rupees(1_180));

        Ok(())
    }

    #[tokio::test]
    async fn rejected_coupon_leaves_the_session_unchanged() {
        let address_id = Uuid::now_v7();

        let cart = cart_with(vec![line(Uuid::now_v7(), "M", 400, 1)]);

        let mut services = Services::new().with_address(address_id);

        services
            .coupons
            .expect_validate()
            .once()
            .returning(|_, _| {
                Err(CouponsServiceError::Rejected(
                    "Minimum order amount is 500".into(),
                ))
            });

        let checkout = services.into_checkout(cart);
        let mut session = checkout.begin().await;

        let result = checkout.apply_coupon(&mut session, "SAVE20").await;

        assert!(matches!(
            result,
            Err(CheckoutError::Coupons(CouponsServiceError::Rejected(_)))
        ));
        assert!(session.applied_coupon().is_none());
    }

    #[tokio::test]
    async fn place_order_requires_the_payment_step() {
        let address_id = Uuid::now_v7();
        let services = Services::new().with_address(address_id);
        let checkout = services.into_checkout(cart_with(vec![line(Uuid::now_v7(), "M", 100, 1)]));

        let mut session = checkout.begin().await;

        let result = checkout.place_order(&mut session).await;

        assert!(matches!(result, Err(CheckoutError::OutOfStep)));
        assert_eq!(session.state(), CheckoutState::AddressSelection);
    }

    #[tokio::test]
    async fn empty_cart_cannot_be_placed() {
        let address_id = Uuid::now_v7();
        let services = Services::new().with_address(address_id);
        let checkout = services.into_checkout(cart_with(vec![]));

        let mut session = session_at_payment(&checkout, address_id).await;

        let result = checkout.place_order(&mut session).await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert_eq!(session.state(), CheckoutState::PaymentSelection);
    }

    #[tokio::test]
    async fn back_to_address_allows_changing_the_selection() -> TestResult {
        let address_id = Uuid::now_v7();
        let other_address = Uuid::now_v7();

        let services = Services::new().with_address(address_id);
        let checkout = services.into_checkout(cart_with(vec![]));

        let mut session = session_at_payment(&checkout, address_id).await;

        checkout.back_to_address(&mut session)?;
        checkout.select_address(&mut session, other_address)?;
        checkout.continue_to_payment(&mut session)?;

        assert_eq!(session.selected_address(), Some(other_address));
        assert_eq!(session.state(), CheckoutState::PaymentSelection);

        Ok(())
    }
}
