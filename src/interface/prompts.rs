use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{Result, TrackerError};
use crate::models::{FoodItem, Macros, Settings, SettingsPatch, StatField, StoredItem, WeightUnit};

/// Minimum similarity for a fuzzy name match.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Prompt for a number, offering `default` when given.
pub fn prompt_number(prompt: &str, default: Option<f64>) -> Result<f64> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    let text = input.interact_text()?;

    text.trim()
        .parse()
        .map_err(|_| TrackerError::InvalidInput(format!("'{}' is not a number", text.trim())))
}

/// Prompt for a weight unit.
pub fn prompt_unit(prompt: &str, current: WeightUnit) -> Result<WeightUnit> {
    let options = [WeightUnit::Lbs, WeightUnit::Kg];
    let default = options.iter().position(|u| *u == current).unwrap_or(0);
    let labels: Vec<&str> = options.iter().map(|u| u.as_str()).collect();

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(options[selection])
}

/// Walk through every setting, starting from the current values.
pub fn prompt_settings(current: &Settings) -> Result<SettingsPatch> {
    let body_weight = prompt_number("Body weight", Some(current.body_weight))?;
    let weight_unit = prompt_unit("Body weight unit", current.weight_unit)?;
    let maintenance_calories =
        prompt_number("Maintenance calories", Some(current.maintenance_calories))?;
    let caloric_adjustment = prompt_number(
        "Caloric adjustment (negative to cut)",
        Some(current.caloric_adjustment),
    )?;
    let macro_ratio_unit = prompt_unit("Macro ratios are per", current.macro_ratio_unit)?;
    let protein_per_unit = prompt_number(
        &format!("Protein (g per {})", macro_ratio_unit),
        Some(current.protein_per_unit),
    )?;
    let fat_per_unit = prompt_number(
        &format!("Fat (g per {})", macro_ratio_unit),
        Some(current.fat_per_unit),
    )?;
    let fiber_goal = prompt_number("Fiber goal (g)", Some(current.fiber_goal))?;

    Ok(SettingsPatch {
        body_weight: Some(body_weight),
        weight_unit: Some(weight_unit),
        maintenance_calories: Some(maintenance_calories),
        caloric_adjustment: Some(caloric_adjustment),
        macro_ratio_unit: Some(macro_ratio_unit),
        protein_per_unit: Some(protein_per_unit),
        fat_per_unit: Some(fat_per_unit),
        fiber_goal: Some(fiber_goal),
    })
}

/// Prompt for a food item, pre-filled from `prefill` when editing or
/// after scanning a label.
pub fn prompt_item(prefill: Option<&FoodItem>) -> Result<FoodItem> {
    let mut name_input = Input::<String>::new().with_prompt("Name");
    if let Some(item) = prefill {
        name_input = name_input.default(item.name.clone());
    }
    let name = name_input.interact_text()?;

    let base_grams = prompt_number(
        "Serving mass (g)",
        prefill.map(|i| i.base_grams).filter(|g| *g > 0.0),
    )?;

    let mut macros = Macros::ZERO;
    for stat in StatField::ALL {
        let current = prefill.map(|i| i.macros.get(stat)).unwrap_or(0.0);
        *macros.get_mut(stat) = prompt_number(
            &format!("{} per serving ({})", stat.label(), stat.unit()),
            Some(current),
        )?;
    }

    Ok(FoodItem::new(name, base_grams, macros))
}

/// Prompt for grams eaten.
pub fn prompt_grams() -> Result<f64> {
    prompt_number("Grams consumed", None)
}

/// Rank items against a typed name.
///
/// An exact (case-insensitive) match is returned alone. Otherwise items
/// scoring above the fuzzy threshold are returned best first.
pub fn match_items<'a>(items: &[&'a StoredItem], query: &str) -> Vec<(&'a StoredItem, f64)> {
    let query = query.trim().to_lowercase();

    if let Some(exact) = items.iter().find(|s| s.item.name.to_lowercase() == query) {
        return vec![(*exact, 1.0)];
    }

    let mut candidates: Vec<(&StoredItem, f64)> = items
        .iter()
        .map(|s| (*s, jaro_winkler(&s.item.name.to_lowercase(), &query)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}

/// Pick an item, by fuzzy name when `query` is given, else from a list.
///
/// Returns `None` when nothing was chosen.
pub fn select_item(items: &[&StoredItem], query: Option<&str>) -> Result<Option<u64>> {
    if items.is_empty() {
        return Ok(None);
    }

    let Some(query) = query else {
        let names: Vec<&str> = items.iter().map(|s| s.item.name.as_str()).collect();
        let selection = Select::new()
            .with_prompt("Which item?")
            .items(&names)
            .default(0)
            .interact()?;
        return Ok(Some(items[selection].id));
    };

    let candidates = match_items(items, query);

    match candidates.as_slice() {
        [] => {
            println!("No matching item found for '{}'", query);
            Ok(None)
        }
        [(only, score)] => {
            if *score >= 1.0 {
                return Ok(Some(only.id));
            }
            let confirm = prompt_yes_no(&format!("Did you mean '{}'?", only.item.name), true)?;
            Ok(confirm.then_some(only.id))
        }
        many => {
            let shown: Vec<&StoredItem> = many.iter().take(5).map(|(s, _)| *s).collect();
            let mut options: Vec<String> = shown.iter().map(|s| s.item.name.clone()).collect();
            options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&options)
                .default(0)
                .interact()?;

            Ok(shown.get(selection).map(|s| s.id))
        }
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
