use serde_json::Value;

use crate::calculator::units::{convert_ratio_to_per_kg, convert_weight_to_kg};
use crate::models::{Macros, Settings, SettingsPatch, DEFAULTS};

/// Daily goals from caller settings overlaid on `DEFAULTS`.
pub fn calculate_goals(patch: &SettingsPatch) -> Macros {
    goals_for(&DEFAULTS.with_overrides(patch))
}

/// Daily goals from a raw settings mapping. Null reads as no overrides.
pub fn calculate_goals_value(settings: &Value) -> Macros {
    calculate_goals(&SettingsPatch::from_value(settings))
}

/// Daily goals from fully resolved settings.
///
/// Calories never go below zero. Protein and fat scale with body weight.
/// Carbs carry no goal of their own and stay at 0.0.
pub fn goals_for(settings: &Settings) -> Macros {
    let weight_kg = convert_weight_to_kg(settings.body_weight, settings.weight_unit);

    let calories = (settings.maintenance_calories + settings.caloric_adjustment).max(0.0);

    let protein_ratio = convert_ratio_to_per_kg(settings.protein_per_unit, settings.macro_ratio_unit);
    let fat_ratio = convert_ratio_to_per_kg(settings.fat_per_unit, settings.macro_ratio_unit);

    let goals = Macros {
        calories,
        protein: weight_kg * protein_ratio,
        fat: weight_kg * fat_ratio,
        fiber: settings.fiber_goal,
        carbs: 0.0,
    };

    tracing::debug!(?settings, ?goals, "calculated goals");
    goals
}
