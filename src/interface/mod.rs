pub mod prompts;
pub mod render;

pub use prompts::{
    match_items, prompt_grams, prompt_item, prompt_number, prompt_settings, prompt_unit,
    prompt_yes_no, select_item,
};
pub use render::{
    display_entries, display_goals, display_items, display_settings, display_stats,
    format_entry_line, format_item_macros, format_ratio, format_stat_line,
};
