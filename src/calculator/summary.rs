use serde_json::Value;

use crate::models::FoodItem;

/// One-line label such as `"Egg: 70 kcal per 50 g"`.
///
/// Items without a serving mass are labelled by name alone.
pub fn summarize_item(item: &FoodItem) -> String {
    if item.base_grams != 0.0 {
        format!(
            "{}: {:.0} kcal per {:.0} g",
            item.name, item.macros.calories, item.base_grams
        )
    } else {
        item.name.clone()
    }
}

/// [`summarize_item`] over a raw item mapping.
pub fn summarize_item_value(item: &Value) -> String {
    summarize_item(&FoodItem::from_value(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_with_serving() {
        let item = json!({"name": "Egg", "base_grams": 50, "macros": {"calories": 70}});
        assert_eq!(summarize_item_value(&item), "Egg: 70 kcal per 50 g");
    }

    #[test]
    fn test_summary_rounds() {
        let item = json!({"name": "Oats", "base_grams": "40.2", "macros": {"calories": 151.7}});
        assert_eq!(summarize_item_value(&item), "Oats: 152 kcal per 40 g");
    }

    #[test]
    fn test_summary_without_serving() {
        assert_eq!(summarize_item_value(&json!({"name": "Water"})), "Water");
        assert_eq!(summarize_item_value(&json!({})), "Item");
        assert_eq!(
            summarize_item_value(&json!({"base_grams": 100, "macros": {}})),
            "Item: 0 kcal per 100 g"
        );
    }
}
