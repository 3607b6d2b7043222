//! Durable client-local state
//!
//! The storefront keeps the cart and wishlist on the device rather than on
//! the server; each install has an independent copy. Writes replace the
//! whole value under a key, so two concurrent writers are last-write-wins.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use mockall::automock;
use thiserror::Error;

/// Storage key for the cart collection.
pub const CART_KEY: &str = "cart";

/// Storage key for the wishlist collection.
pub const WISHLIST_KEY: &str = "wishlist";

/// Errors from the client-local state store.
#[derive(Debug, Error)]
pub enum StateStoreError {
    /// Reading a stored value failed.
    #[error("failed to read client state")]
    Read(#[source] io::Error),

    /// Writing a value failed.
    #[error("failed to write client state")]
    Write(#[source] io::Error),
}

/// Durable key-value storage for client-local state.
#[automock]
pub trait ClientStateStore: Send + Sync {
    /// Load the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StateStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), StateStoreError>;
}

/// Stores each key as a JSON document in a file under a state directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ClientStateStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StateStoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StateStoreError::Read(error)),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StateStoreError> {
        ensure_dir(&self.dir).map_err(StateStoreError::Write)?;

        fs::write(self.path(key), value).map_err(StateStoreError::Write)
    }
}

fn ensure_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(dir)
}
