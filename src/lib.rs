pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod split;
pub mod state;

pub use error::{Result, SplitError};
pub use models::{CalculatedItem, Item, ItemId};
pub use split::{compute, summarize, SplitOutcome};
pub use state::{Action, Session};
