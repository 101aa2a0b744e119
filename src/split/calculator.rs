use tracing::debug;

use crate::models::item::{coerce_amount, display_name_or_default};
use crate::models::{Adjustment, BillSummary, CalculatedItem, Item};
use crate::split::constants::ADJUSTMENT_THRESHOLD;

/// Result of a split request.
///
/// `Unchanged` means there was nothing to split (zero subtotal) and any
/// previously computed result should be kept as is.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitOutcome {
    Computed(Vec<CalculatedItem>),
    Unchanged,
}

impl SplitOutcome {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, SplitOutcome::Unchanged)
    }

    /// The computed rows, if any.
    pub fn into_rows(self) -> Option<Vec<CalculatedItem>> {
        match self {
            SplitOutcome::Computed(rows) => Some(rows),
            SplitOutcome::Unchanged => None,
        }
    }
}

/// Sum of all item prices, invalid prices counting as zero.
pub fn subtotal(items: &[Item]) -> f64 {
    items.iter().map(Item::effective_price).sum()
}

/// Ratio applied to every price.
///
/// Returns 1.0 when no total was paid or there is nothing to split.
pub fn multiplier(subtotal: f64, total_paid: f64) -> f64 {
    let total_paid = coerce_amount(total_paid);
    if total_paid > 0.0 && subtotal > 0.0 {
        total_paid / subtotal
    } else {
        1.0
    }
}

/// Spread `total_paid` across `items` proportionally to their prices.
///
/// With `total_paid <= 0` every item keeps its original price. A subtotal that
/// is zero or overflows to infinity leaves nothing to split.
pub fn compute(items: &[Item], total_paid: f64) -> SplitOutcome {
    let subtotal = subtotal(items);
    if subtotal == 0.0 || !subtotal.is_finite() {
        debug!(items = items.len(), subtotal, "Nothing to split");
        return SplitOutcome::Unchanged;
    }

    let multiplier = multiplier(subtotal, total_paid);
    debug!(subtotal, multiplier, items = items.len(), "Splitting bill");

    let rows = items
        .iter()
        .map(|item| {
            let price = item.effective_price();
            CalculatedItem {
                id: item.id,
                name: display_name_or_default(&item.name).to_string(),
                original_price: price,
                final_price: price * multiplier,
                percentage: price / subtotal * 100.0,
            }
        })
        .collect();

    SplitOutcome::Computed(rows)
}

/// Derive the summary figures for the current items and paid total.
pub fn summarize(items: &[Item], total_paid: f64) -> BillSummary {
    let subtotal = subtotal(items);
    let total_paid = coerce_amount(total_paid);
    let diff = total_paid - subtotal;
    let diff_percentage = if subtotal > 0.0 && subtotal.is_finite() {
        diff.abs() / subtotal * 100.0
    } else {
        0.0
    };

    let adjustment = if total_paid > 0.0 && diff.abs() > ADJUSTMENT_THRESHOLD {
        let amount = diff.abs();
        Some(if diff < 0.0 {
            Adjustment::Discount {
                amount,
                percentage: diff_percentage,
            }
        } else {
            Adjustment::Surcharge {
                amount,
                percentage: diff_percentage,
            }
        })
    } else {
        None
    };

    BillSummary {
        subtotal,
        total_paid,
        diff,
        diff_percentage,
        adjustment,
    }
}
