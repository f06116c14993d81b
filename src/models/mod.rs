mod entry;
mod food;
mod macros;
mod settings;

pub use entry::{LogEntry, StoredEntry};
pub use food::{FoodItem, StoredItem, DEFAULT_ITEM_NAME};
pub use macros::{Macros, StatField, STAT_FIELDS};
pub use settings::{Settings, SettingsPatch, WeightUnit, DEFAULTS, SETTING_KEYS};
