use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme as DialogTheme};
use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{Result, SplitError};
use crate::models::{Item, ItemId, Theme};
use crate::split::{format_amount_input, format_rupiah, parse_amount};

/// Minimum similarity for a fuzzy name match.
const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum number of fuzzy candidates offered.
const MAX_CANDIDATES: usize = 5;

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddRow,
    EditRow,
    RemoveRow,
    SetTotalPaid,
    Calculate,
    Reset,
    ToggleTheme,
    Quit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::AddRow,
        MenuChoice::EditRow,
        MenuChoice::RemoveRow,
        MenuChoice::SetTotalPaid,
        MenuChoice::Calculate,
        MenuChoice::Reset,
        MenuChoice::ToggleTheme,
        MenuChoice::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddRow => "Add row",
            MenuChoice::EditRow => "Edit row",
            MenuChoice::RemoveRow => "Remove row",
            MenuChoice::SetTotalPaid => "Set total paid",
            MenuChoice::Calculate => "Calculate split",
            MenuChoice::Reset => "Reset",
            MenuChoice::ToggleTheme => "Toggle theme",
            MenuChoice::Quit => "Quit",
        }
    }
}

fn dialog_theme(theme: Theme) -> Box<dyn DialogTheme> {
    match theme {
        Theme::Dark => Box::new(ColorfulTheme::default()),
        Theme::Light => Box::new(SimpleTheme),
    }
}

/// Show the main menu and return the chosen entry.
pub fn prompt_menu(theme: Theme) -> Result<MenuChoice> {
    let dialog = dialog_theme(theme);
    let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();

    let selection = Select::with_theme(&*dialog)
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(MenuChoice::ALL[selection])
}

/// Prompt for an item name, keeping `current` when the user just presses Enter.
pub fn prompt_item_name(current: &str, theme: Theme) -> Result<String> {
    let dialog = dialog_theme(theme);
    let name: String = Input::with_theme(&*dialog)
        .with_prompt("Item name")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;

    Ok(name.trim().to_string())
}

/// Prompt for an amount. Anything unreadable counts as zero.
pub fn prompt_amount(prompt: &str, current: f64, theme: Theme) -> Result<f64> {
    let dialog = dialog_theme(theme);
    let initial = format_amount_input(current);

    let input: String = Input::with_theme(&*dialog)
        .with_prompt(format!("{} (Rp)", prompt))
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;

    Ok(parse_amount(&input))
}

/// Let the user pick a row, either from the list or by searching its name.
///
/// Returns `None` when the user backs out.
pub fn prompt_select_item(items: &[Item], prompt: &str, theme: Theme) -> Result<Option<ItemId>> {
    if items.is_empty() {
        return Err(SplitError::InvalidInput("There are no rows".to_string()));
    }

    let dialog = dialog_theme(theme);
    let mut options: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{}. {} ({})",
                i + 1,
                item.display_name(),
                format_rupiah(item.effective_price())
            )
        })
        .collect();
    options.push("Search by name...".to_string());
    options.push("Cancel".to_string());

    let selection = Select::with_theme(&*dialog)
        .with_prompt(prompt)
        .items(&options)
        .default(0)
        .interact()?;

    if selection < items.len() {
        return Ok(Some(items[selection].id));
    }
    if selection == items.len() {
        return prompt_search_item(items, theme);
    }
    Ok(None)
}

fn prompt_search_item(items: &[Item], theme: Theme) -> Result<Option<ItemId>> {
    let dialog = dialog_theme(theme);
    let query: String = Input::with_theme(&*dialog)
        .with_prompt("Row name")
        .allow_empty(true)
        .interact_text()?;

    let candidates = match_items(items, &query);
    match candidates.as_slice() {
        [] => {
            println!("No row matching '{}'", query.trim());
            Ok(None)
        }
        [(id, score)] => {
            if *score >= 1.0 {
                return Ok(Some(*id));
            }
            let name = items
                .iter()
                .find(|i| i.id == *id)
                .map(Item::display_name)
                .unwrap_or_default();
            let confirm = prompt_yes_no(&format!("Did you mean '{}'?", name), true, theme)?;
            Ok(confirm.then_some(*id))
        }
        many => {
            let mut options: Vec<String> = many
                .iter()
                .filter_map(|(id, _)| items.iter().find(|i| i.id == *id))
                .map(|i| i.display_name().to_string())
                .collect();
            let count = options.len();
            options.push("None of these".to_string());

            let selection = Select::with_theme(&*dialog)
                .with_prompt("Which did you mean?")
                .items(&options)
                .default(0)
                .interact()?;

            Ok((selection < count).then(|| many[selection].0))
        }
    }
}

/// Rank rows by name similarity to `query`, best first.
///
/// A case-insensitive exact match wins outright with score 1.0.
pub fn match_items(items: &[Item], query: &str) -> Vec<(ItemId, f64)> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    if let Some(exact) = items.iter().find(|i| i.name.trim().to_lowercase() == query) {
        return vec![(exact.id, 1.0)];
    }

    let mut candidates: Vec<(ItemId, f64)> = items
        .iter()
        .filter(|i| !i.name.trim().is_empty())
        .map(|i| (i.id, jaro_winkler(&i.name.trim().to_lowercase(), &query)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool, theme: Theme) -> Result<bool> {
    let dialog = dialog_theme(theme);
    Ok(Confirm::with_theme(&*dialog)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
