//! Platform Settings Models

use decimal_percentage::Percentage;
use serde::{Deserialize, Serialize};

/// Admin-mutable platform rates, read by every pricing computation.
///
/// Fetched once per checkout session and treated as an immutable snapshot
/// for that session's lifetime; a mid-flow rate change only affects the next
/// checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSettings {
    pub gst_percentage: f64,
    pub platform_fee_percentage: f64,
    pub promotion_fee_percentage: f64,
    pub payment_cycle_days: u32,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            gst_percentage: 18.0,
            platform_fee_percentage: 2.0,
            promotion_fee_percentage: 1.0,
            payment_cycle_days: 7,
        }
    }
}

impl PlatformSettings {
    /// The GST rate as a percentage value usable in discount arithmetic.
    #[must_use]
    pub fn gst(&self) -> Percentage {
        Percentage::from(self.gst_percentage / 100.0)
    }
}
