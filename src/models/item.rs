use std::fmt;

use serde::{Deserialize, Serialize};

use crate::split::constants::DEFAULT_ITEM_NAME;

/// Identifier of a row within a session. Never reused while the session lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A priced row on the bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price: f64,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// A fresh row: empty name, zero price.
    pub fn blank(id: ItemId) -> Self {
        Self::new(id, "", 0.0)
    }

    /// Price used for arithmetic. Non-finite and negative prices count as zero.
    #[inline]
    pub fn effective_price(&self) -> f64 {
        coerce_amount(self.price)
    }

    /// Name shown to the user, falling back to the placeholder when blank.
    pub fn display_name(&self) -> &str {
        display_name_or_default(&self.name)
    }
}

/// Read-only projection of an item after a split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedItem {
    pub id: ItemId,
    pub name: String,
    pub original_price: f64,
    pub final_price: f64,
    /// Share of the subtotal, 0 to 100.
    pub percentage: f64,
}

/// Coerce a raw amount to a usable non-negative number.
#[inline]
pub fn coerce_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

pub(crate) fn display_name_or_default(name: &str) -> &str {
    if name.trim().is_empty() {
        DEFAULT_ITEM_NAME
    } else {
        name
    }
}
