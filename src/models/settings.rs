use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculator::coerce::{field, safe_float, unit_from_value};
use crate::calculator::constants::DEFAULT_FIBER_GOAL;

/// Unit system for body weight and per-weight macro ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Case-insensitive parse. Anything other than "lbs" (including
    /// nothing at all) is kilograms.
    pub fn parse(unit: Option<&str>) -> Self {
        match unit {
            Some(u) if u.eq_ignore_ascii_case("lbs") => WeightUnit::Lbs,
            _ => WeightUnit::Kg,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved goal settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub body_weight: f64,
    pub weight_unit: WeightUnit,
    pub maintenance_calories: f64,
    pub caloric_adjustment: f64,
    pub macro_ratio_unit: WeightUnit,
    pub protein_per_unit: f64,
    pub fat_per_unit: f64,
    pub fiber_goal: f64,
}

/// Setting keys in their canonical order.
pub const SETTING_KEYS: [&str; 8] = [
    "body_weight",
    "weight_unit",
    "maintenance_calories",
    "caloric_adjustment",
    "macro_ratio_unit",
    "protein_per_unit",
    "fat_per_unit",
    "fiber_goal",
];

/// Values used for any setting the caller leaves out.
pub const DEFAULTS: Settings = Settings {
    body_weight: 0.0,
    weight_unit: WeightUnit::Lbs,
    maintenance_calories: 0.0,
    caloric_adjustment: 0.0,
    macro_ratio_unit: WeightUnit::Kg,
    protein_per_unit: 1.8,
    fat_per_unit: 0.6,
    fiber_goal: DEFAULT_FIBER_GOAL,
};

impl Default for Settings {
    fn default() -> Self {
        DEFAULTS
    }
}

impl Settings {
    /// Overlay the keys present in `patch`; everything else is kept.
    pub fn with_overrides(&self, patch: &SettingsPatch) -> Settings {
        Settings {
            body_weight: patch.body_weight.unwrap_or(self.body_weight),
            weight_unit: patch.weight_unit.unwrap_or(self.weight_unit),
            maintenance_calories: patch
                .maintenance_calories
                .unwrap_or(self.maintenance_calories),
            caloric_adjustment: patch.caloric_adjustment.unwrap_or(self.caloric_adjustment),
            macro_ratio_unit: patch.macro_ratio_unit.unwrap_or(self.macro_ratio_unit),
            protein_per_unit: patch.protein_per_unit.unwrap_or(self.protein_per_unit),
            fat_per_unit: patch.fat_per_unit.unwrap_or(self.fat_per_unit),
            fiber_goal: patch.fiber_goal.unwrap_or(self.fiber_goal),
        }
    }
}

/// Caller-provided settings. `None` means "not provided, use the default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<WeightUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caloric_adjustment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macro_ratio_unit: Option<WeightUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber_goal: Option<f64>,
}

impl SettingsPatch {
    /// Read a raw settings mapping.
    ///
    /// A key that is present always overrides its default, even when its
    /// value is null or unparsable: the value is coerced to that key's
    /// fallback (0.0, or 25.0 for `fiber_goal`, or kg for units).
    pub fn from_value(value: &Value) -> Self {
        let number = |key: &str, fallback: f64| {
            field(value, key).map(|raw| safe_float(Some(raw), fallback))
        };
        let unit = |key: &str| field(value, key).map(|raw| unit_from_value(Some(raw)));

        Self {
            body_weight: number("body_weight", 0.0),
            weight_unit: unit("weight_unit"),
            maintenance_calories: number("maintenance_calories", 0.0),
            caloric_adjustment: number("caloric_adjustment", 0.0),
            macro_ratio_unit: unit("macro_ratio_unit"),
            protein_per_unit: number("protein_per_unit", 0.0),
            fat_per_unit: number("fat_per_unit", 0.0),
            fiber_goal: number("fiber_goal", DEFAULT_FIBER_GOAL),
        }
    }

    /// Copy every key present in `other` onto `self`.
    pub fn merge(&mut self, other: &SettingsPatch) {
        macro_rules! overlay {
            ($($name:ident),*) => {
                $(if other.$name.is_some() {
                    self.$name = other.$name;
                })*
            };
        }
        overlay!(
            body_weight,
            weight_unit,
            maintenance_calories,
            caloric_adjustment,
            macro_ratio_unit,
            protein_per_unit,
            fat_per_unit,
            fiber_goal
        );
    }

    pub fn is_empty(&self) -> bool {
        *self == SettingsPatch::default()
    }
}
