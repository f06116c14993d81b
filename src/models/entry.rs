use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculator::coerce::{field, safe_float};
use crate::models::Macros;

/// Grams eaten of something, with that food's per-gram macros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    pub grams: f64,
    pub per_gram: Macros,
}

impl LogEntry {
    pub fn new(grams: f64, per_gram: Macros) -> Self {
        Self { grams, per_gram }
    }

    /// Read a raw entry mapping. A missing `per_gram` reads as all zeros.
    pub fn from_value(value: &Value) -> Self {
        Self {
            grams: safe_float(field(value, "grams"), 0.0),
            per_gram: field(value, "per_gram")
                .map(Macros::from_value)
                .unwrap_or_default(),
        }
    }
}

/// A log line saved in the tracker, pointing at a stored item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub id: u64,
    pub item_id: u64,
    pub grams: f64,
    pub date: NaiveDate,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}
