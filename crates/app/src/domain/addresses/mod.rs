//! Addresses

pub mod errors;
pub mod models;
pub mod service;

pub use errors::AddressesServiceError;
pub use models::{Address, AddressType, NewAddress, PincodeInfo, preselected};
pub use service::*;
