use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculator::coerce::{field, safe_float};

/// Ordered (key, display label) pairs for every tracked stat.
pub const STAT_FIELDS: [(&str, &str); 5] = [
    ("calories", "Calories"),
    ("protein", "Protein"),
    ("fat", "Fat"),
    ("fiber", "Fiber"),
    ("carbs", "Carbs"),
];

/// One of the five tracked stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Calories,
    Protein,
    Fat,
    Fiber,
    Carbs,
}

impl StatField {
    /// All stats in display order (matches `STAT_FIELDS`).
    pub const ALL: [StatField; 5] = [
        StatField::Calories,
        StatField::Protein,
        StatField::Fat,
        StatField::Fiber,
        StatField::Carbs,
    ];

    pub fn key(self) -> &'static str {
        STAT_FIELDS[self.index()].0
    }

    pub fn label(self) -> &'static str {
        STAT_FIELDS[self.index()].1
    }

    /// Unit shown next to a value of this stat.
    pub fn unit(self) -> &'static str {
        match self {
            StatField::Calories => "kcal",
            _ => "g",
        }
    }

    fn index(self) -> usize {
        match self {
            StatField::Calories => 0,
            StatField::Protein => 1,
            StatField::Fat => 2,
            StatField::Fiber => 3,
            StatField::Carbs => 4,
        }
    }
}

/// Calories and macronutrients for some quantity of food.
///
/// The same shape carries per-serving values, per-gram values, daily goals
/// and consumed totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub carbs: f64,
}

impl Macros {
    pub const ZERO: Macros = Macros {
        calories: 0.0,
        protein: 0.0,
        fat: 0.0,
        fiber: 0.0,
        carbs: 0.0,
    };

    /// Read a raw mapping, coercing every stat through `safe_float`.
    ///
    /// Missing keys and non-object values read as zero.
    pub fn from_value(value: &Value) -> Self {
        let mut macros = Macros::ZERO;
        for stat in StatField::ALL {
            *macros.get_mut(stat) = safe_float(field(value, stat.key()), 0.0);
        }
        macros
    }

    pub fn get(&self, stat: StatField) -> f64 {
        match stat {
            StatField::Calories => self.calories,
            StatField::Protein => self.protein,
            StatField::Fat => self.fat,
            StatField::Fiber => self.fiber,
            StatField::Carbs => self.carbs,
        }
    }

    pub fn get_mut(&mut self, stat: StatField) -> &mut f64 {
        match stat {
            StatField::Calories => &mut self.calories,
            StatField::Protein => &mut self.protein,
            StatField::Fat => &mut self.fat,
            StatField::Fiber => &mut self.fiber,
            StatField::Carbs => &mut self.carbs,
        }
    }

    /// Apply `f` to every stat.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            protein: f(self.protein),
            fat: f(self.fat),
            fiber: f(self.fiber),
            carbs: f(self.carbs),
        }
    }

    /// Multiply every stat by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Stats paired with their field, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (StatField, f64)> + '_ {
        StatField::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, other: Macros) {
        for stat in StatField::ALL {
            *self.get_mut(stat) += other.get(stat);
        }
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(mut self, other: Macros) -> Macros {
        self += other;
        self
    }
}
