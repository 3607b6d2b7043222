//! Payment Models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront::prices::Paise;

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery. Always available.
    #[default]
    Cod,
    Card,
    Upi,
    Netbanking,
}

impl PaymentMethod {
    /// Whether this method goes through the payment gateway.
    #[must_use]
    pub fn is_online(self) -> bool {
        self != Self::Cod
    }
}

/// The gateway's short-lived transaction context, opaque beyond the
/// create/verify handshake.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySession {
    pub gateway_order_id: String,
    pub key_id: String,
    pub amount: Paise,
    pub currency: String,
    pub internal_order_id: Uuid,
}

/// The signature handshake the gateway hands back after a charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureTriple {
    pub gateway_order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// What happened inside the external checkout surface.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayOutcome {
    /// The customer paid; the triple must now be verified.
    Completed(SignatureTriple),

    /// The customer closed the surface without paying. This is the only
    /// cancellation path; nothing else can abort a pending payment wait.
    Dismissed,

    /// The gateway reported a failed charge.
    Failed(String),
}
