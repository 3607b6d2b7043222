//! Order Models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront::{items::LineItem, prices::Paise};

use crate::domain::addresses::Address;

/// Delivery destination snapshot stored on the order.
///
/// The address book entry is flattened into a single address line the way
/// the platform's order records expect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub phone: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub landmark: Option<String>,
}

impl From<&Address> for ShippingAddress {
    fn from(address: &Address) -> Self {
        let address_line = match &address.address_line2 {
            Some(line2) if !line2.is_empty() => {
                format!("{}, {line2}", address.address_line1)
            }
            _ => address.address_line1.clone(),
        };

        Self {
            name: address.name.clone(),
            phone: address.phone.clone(),
            address_line,
            city: address.city.clone(),
            state: address.state.clone(),
            pincode: address.pincode.clone(),
            landmark: address.landmark.clone(),
        }
    }
}

/// A new order: the cart snapshot, the computed total and where to ship it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub items: Vec<LineItem>,
    pub total: Paise,
    pub shipping_address: ShippingAddress,
}

/// An order as the platform returns it after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub total: Paise,
    pub status: String,
}

/// One delivery status update recorded against an order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackingEvent {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub timestamp: jiff::Timestamp,
}

/// Tracking view of an order: its current status plus delivery history,
/// newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTracking {
    pub order_id: Uuid,
    pub status: String,
    pub events: Vec<TrackingEvent>,
}

#[cfg(test)]
mod tests {
    use crate::domain::addresses::AddressType;

    use super::*;

    fn address(line2: Option<&str>) -> Address {
        Address {
            id: Uuid::now_v7(),
            name: "Asha Rao".into(),
            phone: "9876543210".into(),
            pincode: "560001".into(),
            address_line1: "12 MG Road".into(),
            address_line2: line2.map(Into::into),
            city: "Bengaluru".into(),
            state: "Karnataka".into(),
            landmark: None,
            address_type: AddressType::Home,
            is_default: true,
        }
    }

    #[test]
    fn joins_both_address_lines() {
        let shipping = ShippingAddress::from(&address(Some("Shanthala Nagar")));

        assert_eq!(shipping.address_line, "12 MG Road, Shanthala Nagar");
    }

    #[test]
    fn single_line_addresses_stay_unjoined() {
        let shipping = ShippingAddress::from(&address(None));

        assert_eq!(shipping.address_line, "12 MG Road");
    }
}
