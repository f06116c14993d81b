//! Pure nutrition math: coercion of raw input, unit conversion, per-gram
//! derivation, goal calculation and consumed totals.
//!
//! Nothing in here performs I/O or returns an error.

pub mod coerce;
pub mod constants;
pub mod goals;
pub mod summary;
pub mod totals;
pub mod units;

pub use coerce::{safe_float, unit_from_value};
pub use constants::*;
pub use goals::{calculate_goals, calculate_goals_value, goals_for};
pub use summary::{summarize_item, summarize_item_value};
pub use totals::{
    calculate_consumed_totals, calculate_consumed_totals_value, entry_macros, per_gram_macros,
    per_gram_macros_value,
};
pub use units::{convert_ratio_to_per_kg, convert_weight_to_kg, ratio_for_unit};
