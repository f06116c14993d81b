pub mod calculator;
pub mod cli;
pub mod error;
pub mod interface;
pub mod label;
pub mod models;
pub mod state;

pub use error::{Result, TrackerError};
pub use models::{FoodItem, LogEntry, Macros, Settings, SettingsPatch, StatField, WeightUnit};
