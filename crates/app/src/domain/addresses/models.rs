//! Address Models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of place an address points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Home,
    Work,
    Other,
}

/// A delivery target saved in the customer's address book.
///
/// At most one address per customer carries `is_default`; the address
/// service enforces that, not this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub pincode: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub landmark: Option<String>,
    pub address_type: AddressType,
    pub is_default: bool,
}

/// Payload for saving a new address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAddress {
    pub name: String,
    pub phone: String,
    pub pincode: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub landmark: Option<String>,
    pub address_type: AddressType,
    pub is_default: bool,
}

/// City and state resolved from a pincode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PincodeInfo {
    pub city: String,
    pub state: String,
}

/// The address checkout preselects: the default one, else the first listed.
#[must_use]
pub fn preselected<'a>(addresses: &'a [Address]) -> Option<&'a Address> {
    addresses
        .iter()
        .find(|a| a.is_default)
        .or_else(|| addresses.first())
}
