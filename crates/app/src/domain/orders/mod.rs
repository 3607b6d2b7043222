//! Orders

pub mod errors;
pub mod models;
pub mod service;

pub use errors::OrdersServiceError;
pub use models::{NewOrder, Order, OrderTracking, ShippingAddress, TrackingEvent};
pub use service::*;
