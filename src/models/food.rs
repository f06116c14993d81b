use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculator::coerce::{field, safe_float};
use crate::models::Macros;

/// Name used when an item has none.
pub const DEFAULT_ITEM_NAME: &str = "Item";

/// A food with its macros for one serving of `base_grams`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodItem {
    pub name: String,
    pub base_grams: f64,
    pub macros: Macros,
}

impl Default for FoodItem {
    fn default() -> Self {
        Self {
            name: DEFAULT_ITEM_NAME.to_string(),
            base_grams: 0.0,
            macros: Macros::ZERO,
        }
    }
}

impl FoodItem {
    pub fn new(name: impl Into<String>, base_grams: f64, macros: Macros) -> Self {
        Self {
            name: name.into(),
            base_grams,
            macros,
        }
    }

    /// Read a raw item mapping. Absent or null names become "Item".
    pub fn from_value(value: &Value) -> Self {
        let name = match field(value, "name") {
            None | Some(Value::Null) => DEFAULT_ITEM_NAME.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        Self {
            name,
            base_grams: safe_float(field(value, "base_grams"), 0.0),
            macros: field(value, "macros")
                .map(Macros::from_value)
                .unwrap_or_default(),
        }
    }
}

/// A food item saved in the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredItem {
    pub id: u64,
    #[serde(flatten)]
    pub item: FoodItem,
    /// Macros of one gram, derived from `item` on every save.
    pub per_gram: Macros,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}
