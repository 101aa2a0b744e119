pub mod amount;
pub mod calculator;
pub mod constants;

pub use amount::{format_amount_input, format_percentage, format_plain, format_rupiah, parse_amount};
pub use calculator::{compute, multiplier, subtotal, summarize, SplitOutcome};
pub use constants::*;
