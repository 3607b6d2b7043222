//! Wishlist

pub mod errors;
pub mod models;
pub mod service;

pub use errors::WishlistStoreError;
pub use models::WishlistEntry;
pub use service::WishlistStore;
