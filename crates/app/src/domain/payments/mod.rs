//! Payments

pub mod errors;
pub mod models;
pub mod service;

pub use errors::PaymentsServiceError;
pub use models::{GatewayOutcome, GatewaySession, PaymentMethod, SignatureTriple};
pub use service::*;
