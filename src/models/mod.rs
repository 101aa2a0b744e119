pub mod item;
pub mod summary;
pub mod theme;

pub use item::{CalculatedItem, Item, ItemId};
pub use summary::{Adjustment, BillSummary};
pub use theme::Theme;
