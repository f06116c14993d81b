use serde_json::Value;

use crate::calculator::coerce::safe_float;
use crate::calculator::constants::MIN_BASE_GRAMS;
use crate::models::{LogEntry, Macros};

/// Macros of one gram of a food whose serving of `base_grams` has `macros`.
///
/// The serving mass is floored at `MIN_BASE_GRAMS`, so a zero or negative
/// mass yields very large values rather than a division by zero. A NaN mass
/// is not floored and gives NaN values.
pub fn per_gram_macros(macros: &Macros, base_grams: f64) -> Macros {
    let base = if base_grams.is_nan() {
        base_grams
    } else {
        base_grams.max(MIN_BASE_GRAMS)
    };
    macros.map(|v| v / base)
}

/// [`per_gram_macros`] over raw input.
pub fn per_gram_macros_value(macros: &Value, base_grams: Option<&Value>) -> Macros {
    per_gram_macros(&Macros::from_value(macros), safe_float(base_grams, 0.0))
}

/// What `grams` of a food with `per_gram` macros contributes.
#[inline]
pub fn entry_macros(per_gram: &Macros, grams: f64) -> Macros {
    per_gram.scale(grams)
}

/// Sum of everything eaten across `entries`.
///
/// Entries without a positive gram count are skipped.
pub fn calculate_consumed_totals(entries: &[LogEntry]) -> Macros {
    let mut totals = Macros::ZERO;
    let mut counted = 0usize;

    for entry in entries.iter().filter(|e| e.grams > 0.0) {
        totals += entry_macros(&entry.per_gram, entry.grams);
        counted += 1;
    }

    tracing::debug!(
        entries = entries.len(),
        counted,
        calories = totals.calories,
        "calculated consumed totals"
    );
    totals
}

/// [`calculate_consumed_totals`] over a raw list. Non-lists read as empty.
pub fn calculate_consumed_totals_value(entries: &Value) -> Macros {
    let entries: Vec<LogEntry> = entries
        .as_array()
        .map(|list| list.iter().map(LogEntry::from_value).collect())
        .unwrap_or_default();
    calculate_consumed_totals(&entries)
}
