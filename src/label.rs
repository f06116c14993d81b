//! Pull serving size and macros out of OCR'd nutrition-label text.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{FoodItem, Macros};

const NUMBER: &str = r"([0-9]+(?:\.[0-9]+)?)";

fn compile(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("label pattern is valid"))
        .collect()
}

static SERVING: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[format!(r"{NUMBER}\s*(g|grams?)")]));

static CALORIES: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"calories[^0-9]*([0-9]+)".to_string(), r"([0-9]+)\s*kcal".to_string()]));

static PROTEIN: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[format!(r"protein[^0-9]*{NUMBER}")]));

static FAT: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        format!(r"total\s*fat[^0-9]*{NUMBER}"),
        format!(r"fat[^0-9]*{NUMBER}"),
    ])
});

static CARBS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        format!(r"total\s*carb[^0-9]*{NUMBER}"),
        format!(r"carbohydrate[^0-9]*{NUMBER}"),
    ])
});

static FIBER: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        format!(r"dietary\s*fiber[^0-9]*{NUMBER}"),
        format!(r"fiber[^0-9]*{NUMBER}"),
    ])
});

/// Values read off a label. Anything not found is 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LabelFacts {
    pub serving: f64,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
}

impl LabelFacts {
    /// Whether anything at all was recognised.
    pub fn is_empty(&self) -> bool {
        *self == LabelFacts::default()
    }

    pub fn macros(&self) -> Macros {
        Macros {
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            fiber: self.fiber,
            carbs: self.carbs,
        }
    }

    /// A food item for one labelled serving.
    pub fn into_item(self, name: impl Into<String>) -> FoodItem {
        FoodItem::new(name, self.serving, self.macros())
    }
}

/// First capture of the first pattern that matches and parses, as a number.
fn extract(text: &str, patterns: &[Regex]) -> f64 {
    patterns
        .iter()
        .find_map(|re| {
            re.captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
        })
        .unwrap_or(0.0)
}

/// Parse label text. Matching is case-insensitive and treats `|` as `l`,
/// a common OCR misread.
pub fn parse_label_text(text: &str) -> LabelFacts {
    let normalized = text.to_lowercase().replace('|', "l");

    let facts = LabelFacts {
        serving: extract(&normalized, &SERVING),
        calories: extract(&normalized, &CALORIES),
        protein: extract(&normalized, &PROTEIN),
        fat: extract(&normalized, &FAT),
        carbs: extract(&normalized, &CARBS),
        fiber: extract(&normalized, &FIBER),
    };

    if facts.is_empty() {
        tracing::warn!("Nothing recognised in label text");
    } else {
        tracing::debug!(?facts, "parsed label");
    }
    facts
}
