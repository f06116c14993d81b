use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::models::{SettingsPatch, WeightUnit};

/// Calorie Tracker: derive daily calorie and macro goals and log what you eat.
#[derive(Parser, Debug)]
#[command(name = "calorie_tracker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the tracker state JSON file.
    #[arg(short, long, global = true, default_value = "tracker_state.json")]
    pub file: PathBuf,

    /// Day to show or log against (YYYY-MM-DD). Defaults to today.
    #[arg(short, long, global = true)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show consumed totals against today's goals.
    Status,

    /// Show daily goals derived from settings.
    Goals,

    /// Show or change settings. With no flags, prompts for every setting.
    Settings(SettingsArgs),

    /// Add to (or subtract from) the caloric adjustment.
    Adjust {
        /// Calories to add; negative to subtract.
        #[arg(allow_hyphen_values = true)]
        delta: f64,
    },

    /// Save a new food item. Missing values are prompted for.
    AddItem(ItemArgs),

    /// Edit a saved food item.
    EditItem {
        id: u64,
    },

    /// List saved food items.
    Items,

    /// Delete a food item and its log entries.
    DeleteItem {
        id: u64,
    },

    /// Log grams eaten of an item.
    Log {
        /// Item name (fuzzy matched). Prompts when omitted.
        item: Option<String>,

        /// Grams consumed. Prompts when omitted.
        grams: Option<f64>,
    },

    /// List the day's log.
    Entries,

    /// Change the grams of a log entry.
    SetGrams {
        id: u64,
        grams: f64,
    },

    /// Remove a log entry.
    RemoveEntry {
        id: u64,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Status
    }
}

#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Print the current settings without changing them.
    #[arg(long)]
    pub show: bool,

    #[arg(long)]
    pub body_weight: Option<f64>,

    #[arg(long)]
    pub weight_unit: Option<String>,

    #[arg(long)]
    pub maintenance_calories: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub caloric_adjustment: Option<f64>,

    #[arg(long)]
    pub macro_ratio_unit: Option<String>,

    #[arg(long)]
    pub protein_per_unit: Option<f64>,

    #[arg(long)]
    pub fat_per_unit: Option<f64>,

    #[arg(long)]
    pub fiber_goal: Option<f64>,
}

impl SettingsArgs {
    /// The settings given on the command line.
    pub fn patch(&self) -> SettingsPatch {
        SettingsPatch {
            body_weight: self.body_weight,
            weight_unit: self.weight_unit.as_deref().map(|u| WeightUnit::parse(Some(u))),
            maintenance_calories: self.maintenance_calories,
            caloric_adjustment: self.caloric_adjustment,
            macro_ratio_unit: self
                .macro_ratio_unit
                .as_deref()
                .map(|u| WeightUnit::parse(Some(u))),
            protein_per_unit: self.protein_per_unit,
            fat_per_unit: self.fat_per_unit,
            fiber_goal: self.fiber_goal,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ItemArgs {
    /// Item name.
    #[arg(long)]
    pub name: Option<String>,

    /// Serving mass in grams.
    #[arg(long)]
    pub grams: Option<f64>,

    #[arg(long)]
    pub calories: Option<f64>,

    #[arg(long)]
    pub protein: Option<f64>,

    #[arg(long)]
    pub fat: Option<f64>,

    #[arg(long)]
    pub carbs: Option<f64>,

    #[arg(long)]
    pub fiber: Option<f64>,

    /// Text file with an OCR'd nutrition label to pre-fill from.
    #[arg(long)]
    pub label: Option<PathBuf>,
}

impl ItemArgs {
    /// Whether name and serving mass were both given.
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.grams.is_some()
    }
}
