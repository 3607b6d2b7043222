//! Coupons

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CouponsServiceError;
pub use models::{AppliedCoupon, DiscountKind};
pub use service::*;
