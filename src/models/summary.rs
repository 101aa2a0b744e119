use serde::{Deserialize, Serialize};

/// Difference between what was paid and the subtotal, when large enough to show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adjustment {
    Surcharge { amount: f64, percentage: f64 },
    Discount { amount: f64, percentage: f64 },
}

impl Adjustment {
    /// Absolute amount of the adjustment.
    pub fn amount(&self) -> f64 {
        match self {
            Adjustment::Surcharge { amount, .. } | Adjustment::Discount { amount, .. } => *amount,
        }
    }

    /// Adjustment as a percentage of the subtotal.
    pub fn percentage(&self) -> f64 {
        match self {
            Adjustment::Surcharge { percentage, .. } | Adjustment::Discount { percentage, .. } => {
                *percentage
            }
        }
    }

    pub fn is_discount(&self) -> bool {
        matches!(self, Adjustment::Discount { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Adjustment::Surcharge { .. } => "Surcharge",
            Adjustment::Discount { .. } => "Discount",
        }
    }
}

/// Summary figures derived from the live session, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSummary {
    pub subtotal: f64,
    pub total_paid: f64,
    /// `total_paid - subtotal`; positive means surcharge.
    pub diff: f64,
    pub diff_percentage: f64,
    pub adjustment: Option<Adjustment>,
}

impl BillSummary {
    /// What was actually paid: the entered total, or the subtotal when none was given.
    pub fn amount_paid(&self) -> f64 {
        if self.total_paid > 0.0 {
            self.total_paid
        } else {
            self.subtotal
        }
    }
}
