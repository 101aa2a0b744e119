use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::item::coerce_amount;
use crate::models::{BillSummary, CalculatedItem, Item, ItemId, Theme};
use crate::split::{self, SplitOutcome, DEFAULT_ROW_COUNT};

/// A user interaction with the bill form.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddItem,
    RemoveItem(ItemId),
    UpdateName(ItemId, String),
    UpdatePrice(ItemId, f64),
    SetTotalPaid(f64),
    Calculate,
    Reset,
    ToggleTheme,
}

/// Rows of the last split together with the summary they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Calculation {
    rows: Vec<CalculatedItem>,
    summary: BillSummary,
}

/// Everything the bill form holds between interactions.
///
/// Each interaction goes through [`Session::apply`], which consumes the
/// previous state and returns the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionData")]
pub struct Session {
    items: Vec<Item>,
    total_paid: f64,
    /// `None` until the first successful calculation.
    result: Option<Calculation>,
    theme: Theme,
    next_id: u64,
}

/// Unchecked wire form of [`Session`].
#[derive(Deserialize)]
struct SessionData {
    items: Vec<Item>,
    total_paid: f64,
    result: Option<Calculation>,
    theme: Theme,
    next_id: u64,
}

impl TryFrom<SessionData> for Session {
    type Error = String;

    /// Rejects duplicate item ids and moves `next_id` past every id in use.
    fn try_from(data: SessionData) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(data.items.len());
        for item in &data.items {
            if !seen.insert(item.id) {
                return Err(format!("duplicate item id {}", item.id));
            }
        }

        let max_id = data.items.iter().map(|item| item.id.0).max().unwrap_or(0);

        Ok(Self {
            items: data.items,
            total_paid: coerce_amount(data.total_paid),
            result: data.result,
            theme: data.theme,
            next_id: data.next_id.max(max_id + 1),
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session with the default blank rows.
    pub fn new() -> Self {
        let mut session = Self {
            items: Vec::new(),
            total_paid: 0.0,
            result: None,
            theme: Theme::default(),
            next_id: 1,
        };
        session.items = session.blank_rows();
        session
    }

    /// A session pre-filled with items.
    ///
    /// Ids are reassigned in order so they are unique regardless of input.
    pub fn with_items(items: Vec<Item>, total_paid: f64) -> Self {
        let mut session = Self {
            items: Vec::with_capacity(items.len()),
            total_paid: coerce_amount(total_paid),
            result: None,
            theme: Theme::default(),
            next_id: 1,
        };
        for item in items {
            let id = session.allocate_id();
            session.items.push(Item { id, ..item });
        }
        session
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total_paid(&self) -> f64 {
        self.total_paid
    }

    pub fn result(&self) -> Option<&[CalculatedItem]> {
        self.result.as_ref().map(|calc| calc.rows.as_slice())
    }

    /// Summary as it stood when the current result was calculated.
    ///
    /// Unlike [`Session::summary`] this does not follow later edits.
    pub fn result_summary(&self) -> Option<&BillSummary> {
        self.result.as_ref().map(|calc| &calc.summary)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn find_item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn subtotal(&self) -> f64 {
        split::subtotal(&self.items)
    }

    /// Summary figures re-derived from the current items and total.
    pub fn summary(&self) -> BillSummary {
        split::summarize(&self.items, self.total_paid)
    }

    /// Apply one interaction and return the resulting state.
    pub fn apply(mut self, action: Action) -> Self {
        debug!(?action, "Applying action");

        match action {
            Action::AddItem => {
                let id = self.allocate_id();
                self.items.push(Item::blank(id));
            }
            Action::RemoveItem(id) => {
                self.items.retain(|item| item.id != id);
            }
            Action::UpdateName(id, name) => {
                if let Some(item) = self.item_mut(id) {
                    item.name = name;
                }
            }
            Action::UpdatePrice(id, price) => {
                if let Some(item) = self.item_mut(id) {
                    item.price = coerce_amount(price);
                }
            }
            Action::SetTotalPaid(total) => {
                self.total_paid = coerce_amount(total);
            }
            Action::Calculate => match split::compute(&self.items, self.total_paid) {
                SplitOutcome::Computed(rows) => {
                    let summary = split::summarize(&self.items, self.total_paid);
                    self.result = Some(Calculation { rows, summary });
                }
                SplitOutcome::Unchanged => {
                    debug!("Nothing to split, keeping previous result");
                }
            },
            Action::Reset => {
                self.items = self.blank_rows();
                self.total_paid = 0.0;
                self.result = None;
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggle();
            }
        }

        self
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    fn blank_rows(&mut self) -> Vec<Item> {
        (0..DEFAULT_ROW_COUNT)
            .map(|_| Item::blank(self.allocate_id()))
            .collect()
    }
}
