pub mod prompts;
pub mod render;

pub use prompts::{
    match_items, prompt_amount, prompt_item_name, prompt_menu, prompt_select_item, prompt_yes_no,
    MenuChoice,
};
pub use render::{display_items, display_result, render_badge, render_items, render_result};
