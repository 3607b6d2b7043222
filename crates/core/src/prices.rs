//! Prices

use std::fmt;
use std::ops::Deref;

use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};

/// An amount in paise, the minor unit of the Indian rupee.
///
/// All pricing arithmetic in this crate happens on this representation;
/// rupee-and-decimal rendering only happens at the display boundary via
/// [`format_inr`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Paise(u64);

impl Paise {
    /// Creates an amount from raw paise.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Paise(value)
    }

    /// Creates an amount from whole rupees.
    #[must_use]
    pub const fn from_rupees(rupees: u64) -> Self {
        Paise(rupees * 100)
    }

    /// Returns the raw paise value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Deref for Paise {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<u64> for Paise {
    fn from(value: u64) -> Self {
        Paise(value)
    }
}

impl fmt::Display for Paise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_inr(self.0))
    }
}

/// Formats a paise amount as rupees for display, e.g. `₹708.00`.
#[must_use]
pub fn format_inr(paise: u64) -> String {
    let minor = i64::try_from(paise).unwrap_or(i64::MAX);

    Money::from_minor(minor, iso::INR).to_string()
}
