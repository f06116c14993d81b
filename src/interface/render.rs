use crate::calculator::{convert_ratio_to_per_kg, entry_macros, ratio_for_unit, summarize_item};
use crate::models::{Macros, Settings, StatField, StoredEntry, StoredItem, WeightUnit};

/// `"consumed / goal"` for one stat card.
///
/// A goal of zero or less shows as `-`. Consumed values get one decimal
/// when there is no goal to compare against.
pub fn format_stat_line(consumed: f64, goal: f64) -> String {
    let goal_text = if goal > 0.0 {
        format!("{:.0}", goal)
    } else {
        "-".to_string()
    };
    let has_goal = goal != 0.0 && !goal.is_nan();
    let consumed_text = if has_goal {
        format!("{:.0}", consumed)
    } else {
        format!("{:.1}", consumed)
    };
    format!("{} / {}", consumed_text, goal_text)
}

/// Display consumed totals against goals, one line per stat.
pub fn display_stats(goals: &Macros, totals: &Macros) {
    println!();
    println!("=== Today ===");
    println!();
    for stat in StatField::ALL {
        println!(
            "  {:<9} {} {}",
            stat.label(),
            format_stat_line(totals.get(stat), goals.get(stat)),
            stat.unit()
        );
    }
    println!();
}

/// Display goals alone.
pub fn display_goals(goals: &Macros) {
    println!();
    println!("=== Daily goals ===");
    println!();
    for (stat, value) in goals.iter() {
        println!("  {:<9} {:.0} {}", stat.label(), value, stat.unit());
    }
    println!();
}

/// Macro breakdown of one serving, as shown under an item.
pub fn format_item_macros(macros: &Macros) -> String {
    format!(
        "Protein {:.1} g | Fat {:.1} g | Carbs {:.1} g | Fiber {:.1} g",
        macros.protein, macros.fat, macros.carbs, macros.fiber
    )
}

/// Display saved food items.
pub fn display_items(items: &[&StoredItem]) {
    if items.is_empty() {
        println!("No items yet.");
        return;
    }

    println!();
    println!("=== Food items ({}) ===", items.len());
    println!();

    for stored in items {
        println!("  [{}] {}", stored.id, summarize_item(&stored.item));
        println!("       {}", format_item_macros(&stored.item.macros));
    }

    println!();
}

/// One log line: what `entry` grams of `item` added up to.
pub fn format_entry_line(entry: &StoredEntry, item: &StoredItem) -> String {
    let eaten = entry_macros(&item.per_gram, entry.grams);
    format!(
        "{} ({} g) - {:.0} kcal | {:.1} g protein | {:.1} g fat | {:.1} g carbs | {:.1} g fiber",
        item.item.name, entry.grams, eaten.calories, eaten.protein, eaten.fat, eaten.carbs, eaten.fiber
    )
}

/// Display a day's log.
pub fn display_entries(entries: &[(&StoredEntry, &StoredItem)]) {
    if entries.is_empty() {
        println!("No food logged yet. Create or select an item.");
        return;
    }

    println!();
    println!("=== Food log ===");
    println!();

    for (entry, item) in entries {
        println!("  [{}] {}", entry.id, format_entry_line(entry, item));
    }

    println!();
}

/// A per-unit ratio with its equivalent in the other unit, e.g.
/// `"1.8 g/kg (0.82 g/lb)"`.
pub fn format_ratio(per_unit: f64, unit: WeightUnit) -> String {
    let per_kg = convert_ratio_to_per_kg(per_unit, unit);
    let other = match unit {
        WeightUnit::Kg => WeightUnit::Lbs,
        WeightUnit::Lbs => WeightUnit::Kg,
    };
    format!(
        "{} g/{} ({:.2} g/{})",
        per_unit,
        unit_suffix(unit),
        ratio_for_unit(per_kg, other),
        unit_suffix(other)
    )
}

fn unit_suffix(unit: WeightUnit) -> &'static str {
    match unit {
        WeightUnit::Kg => "kg",
        WeightUnit::Lbs => "lb",
    }
}

/// Display the resolved settings.
pub fn display_settings(settings: &Settings) {
    println!();
    println!("=== Settings ===");
    println!();
    println!("  Body weight:          {} {}", settings.body_weight, settings.weight_unit);
    println!("  Maintenance calories: {}", settings.maintenance_calories);
    println!("  Caloric adjustment:   {:+}", settings.caloric_adjustment);
    println!(
        "  Protein:              {}",
        format_ratio(settings.protein_per_unit, settings.macro_ratio_unit)
    );
    println!(
        "  Fat:                  {}",
        format_ratio(settings.fat_per_unit, settings.macro_ratio_unit)
    );
    println!("  Fiber goal:           {} g", settings.fiber_goal);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodItem;
    use chrono::NaiveDate;

    #[test]
    fn test_stat_line_with_goal() {
        assert_eq!(format_stat_line(1234.4, 2000.0), "1234 / 2000");
    }

    #[test]
    fn test_stat_line_without_goal() {
        assert_eq!(format_stat_line(12.34, 0.0), "12.3 / -");
        // A negative goal still switches off the decimal but shows no target
        assert_eq!(format_stat_line(12.34, -5.0), "12 / -");
    }

    #[test]
    fn test_item_macros() {
        let macros = Macros {
            protein: 6.04,
            fat: 5.0,
            ..Macros::ZERO
        };
        assert_eq!(
            format_item_macros(&macros),
            "Protein 6.0 g | Fat 5.0 g | Carbs 0.0 g | Fiber 0.0 g"
        );
    }

    #[test]
    fn test_entry_line() {
        let item = StoredItem {
            id: 1,
            item: FoodItem::new("Oats", 40.0, Macros::ZERO),
            per_gram: Macros {
                calories: 3.8,
                protein: 0.13,
                ..Macros::ZERO
            },
            created_at: 0,
        };
        let entry = StoredEntry {
            id: 4,
            item_id: 1,
            grams: 80.0,
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            created_at: 0,
        };
        assert_eq!(
            format_entry_line(&entry, &item),
            "Oats (80 g) - 304 kcal | 10.4 g protein | 0.0 g fat | 0.0 g carbs | 0.0 g fiber"
        );
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(1.8, WeightUnit::Kg), "1.8 g/kg (0.82 g/lb)");
        assert_eq!(format_ratio(1.0, WeightUnit::Lbs), "1 g/lb (2.20 g/kg)");
    }
}
