//! Variants
//!
//! The (size, colour) pair that distinguishes otherwise-identical product
//! entries in a cart. Variant equality is field-wise over normalised values,
//! never over concatenated strings, so a product with no options and a
//! product whose option happens to collide with a separator can never alias.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder value for an unselected size or colour.
pub const DEFAULT_OPTION: &str = "default";

/// A product variant selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    size: String,
    color: String,
}

impl Variant {
    /// Creates a variant, normalising absent or empty options to
    /// [`DEFAULT_OPTION`].
    #[must_use]
    pub fn new(size: Option<&str>, color: Option<&str>) -> Self {
        Self {
            size: normalise(size),
            color: normalise(color),
        }
    }

    /// The selected size, or [`DEFAULT_OPTION`].
    #[must_use]
    pub fn size(&self) -> &str {
        &self.size
    }

    /// The selected colour, or [`DEFAULT_OPTION`].
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Whether neither a size nor a colour was selected.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.size == DEFAULT_OPTION && self.color == DEFAULT_OPTION
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn normalise(option: Option<&str>) -> String {
    match option {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => DEFAULT_OPTION.to_string(),
    }
}

/// Full compound identity of a cart line.
///
/// Two line items are the same entity iff their keys are equal; quantity
/// updates and removals match on this key, never on the product id alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    /// Product identifier.
    pub product_id: Uuid,

    /// Selected variant.
    pub variant: Variant,
}

impl LineKey {
    /// Creates a key from a product id and variant.
    #[must_use]
    pub fn new(product_id: Uuid, variant: Variant) -> Self {
        Self {
            product_id,
            variant,
        }
    }
}
