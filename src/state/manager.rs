use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator;
use crate::error::{Result, TrackerError};
use crate::models::{
    FoodItem, LogEntry, Macros, Settings, SettingsPatch, StoredEntry, StoredItem, DEFAULTS,
};

/// Settings, saved food items and the food log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerState {
    /// Only the settings the user has changed; the rest come from `DEFAULTS`.
    pub settings: SettingsPatch,
    items: Vec<StoredItem>,
    entries: Vec<StoredEntry>,
    next_item_id: u64,
    next_entry_id: u64,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Trim and check a food item before it is saved.
fn validate_item(mut item: FoodItem) -> Result<FoodItem> {
    item.name = item.name.trim().to_string();
    if item.name.is_empty() {
        return Err(TrackerError::InvalidInput("Name is required".to_string()));
    }
    if !item.base_grams.is_finite() || item.base_grams <= 0.0 {
        return Err(TrackerError::InvalidInput(
            "Serving mass must be greater than zero".to_string(),
        ));
    }
    if let Some((stat, _)) = item.macros.iter().find(|(_, v)| !v.is_finite()) {
        return Err(TrackerError::InvalidInput(format!(
            "{} must be a finite number",
            stat.label()
        )));
    }
    Ok(item)
}

/// Per-gram macros of a validated item. Values that overflow to infinity
/// are rejected.
fn item_per_gram(item: &FoodItem) -> Result<Macros> {
    let per_gram = calculator::per_gram_macros(&item.macros, item.base_grams);
    if per_gram.iter().any(|(_, v)| !v.is_finite()) {
        return Err(TrackerError::InvalidInput(
            "Per-gram values are out of range".to_string(),
        ));
    }
    Ok(per_gram)
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings with defaults filled in.
    pub fn settings(&self) -> Settings {
        DEFAULTS.with_overrides(&self.settings)
    }

    /// Overlay the keys present in `patch` on the saved settings.
    pub fn update_settings(&mut self, patch: &SettingsPatch) {
        self.settings.merge(patch);
        tracing::info!(?patch, "updated settings");
    }

    /// Nudge the caloric adjustment by `delta`, returning the new value.
    pub fn adjust_calories(&mut self, delta: f64) -> f64 {
        let next = self.settings().caloric_adjustment + delta;
        self.settings.caloric_adjustment = Some(next);
        next
    }

    pub fn goals(&self) -> Macros {
        calculator::calculate_goals(&self.settings)
    }

    // ── Items ────────────────────────────────────────────────────────────

    /// Save a new food item, returning its id.
    pub fn add_item(&mut self, item: FoodItem) -> Result<u64> {
        let item = validate_item(item)?;
        let per_gram = item_per_gram(&item)?;
        let id = self.allocate_item_id()?;

        tracing::info!(id, name = %item.name, "added item");
        self.items.push(StoredItem {
            id,
            item,
            per_gram,
            created_at: now_millis(),
        });
        Ok(id)
    }

    /// Replace an item's name, serving and macros. Its log entries follow
    /// the new per-gram values.
    pub fn update_item(&mut self, id: u64, item: FoodItem) -> Result<()> {
        let item = validate_item(item)?;
        let per_gram = item_per_gram(&item)?;
        let stored = self
            .items
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(TrackerError::ItemNotFound(id))?;

        stored.per_gram = per_gram;
        stored.item = item;
        tracing::info!(id, "updated item");
        Ok(())
    }

    /// Remove an item and every log entry that points at it.
    pub fn delete_item(&mut self, id: u64) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|s| s.id != id);
        if self.items.len() == before {
            return Err(TrackerError::ItemNotFound(id));
        }

        let entries_before = self.entries.len();
        self.entries.retain(|e| e.item_id != id);
        tracing::info!(
            id,
            removed_entries = entries_before - self.entries.len(),
            "deleted item"
        );
        Ok(())
    }

    pub fn get_item(&self, id: u64) -> Option<&StoredItem> {
        self.items.iter().find(|s| s.id == id)
    }

    /// Look up an item by name (case-insensitive).
    pub fn find_item(&self, name: &str) -> Option<&StoredItem> {
        let name = name.trim();
        self.items
            .iter()
            .find(|s| s.item.name.eq_ignore_ascii_case(name))
    }

    /// All items, newest first.
    pub fn items(&self) -> Vec<&StoredItem> {
        let mut items: Vec<&StoredItem> = self.items.iter().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items
    }

    // ── Entries ──────────────────────────────────────────────────────────

    /// Log `grams` of an item on `date`, returning the entry id.
    pub fn add_entry(&mut self, item_id: u64, grams: f64, date: NaiveDate) -> Result<u64> {
        if self.get_item(item_id).is_none() || !grams.is_finite() || grams <= 0.0 {
            return Err(TrackerError::InvalidInput(
                "Item and grams are required".to_string(),
            ));
        }

        let id = self.allocate_entry_id()?;
        self.entries.push(StoredEntry {
            id,
            item_id,
            grams,
            date,
            created_at: now_millis(),
        });
        tracing::info!(id, item_id, grams, %date, "logged entry");
        Ok(id)
    }

    /// Change the grams of an entry. Returns `false` when no entry has `id`.
    ///
    /// Zero is allowed and leaves the entry in the log without counting it.
    pub fn update_entry_grams(&mut self, id: u64, grams: f64) -> Result<bool> {
        if !grams.is_finite() {
            return Err(TrackerError::InvalidInput(
                "Grams must be a finite number".to_string(),
            ));
        }
        if grams < 0.0 {
            return Err(TrackerError::InvalidInput(
                "Grams cannot be negative".to_string(),
            ));
        }
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.grams = grams;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn delete_entry(&mut self, id: u64) -> Result<()> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Err(TrackerError::EntryNotFound(id));
        }
        Ok(())
    }

    /// Entries logged on `date`, oldest first, with their items.
    ///
    /// Entries whose item no longer exists are left out.
    pub fn entries_for_date(&self, date: NaiveDate) -> Vec<(&StoredEntry, &StoredItem)> {
        let items: HashMap<u64, &StoredItem> = self.items.iter().map(|s| (s.id, s)).collect();

        let mut pairs: Vec<(&StoredEntry, &StoredItem)> = self
            .entries
            .iter()
            .filter(|e| e.date == date)
            .filter_map(|e| items.get(&e.item_id).map(|item| (e, *item)))
            .collect();
        pairs.sort_by(|a, b| a.0.created_at.cmp(&b.0.created_at).then(a.0.id.cmp(&b.0.id)));
        pairs
    }

    /// The calculator's view of a day's log.
    pub fn log_entries_for_date(&self, date: NaiveDate) -> Vec<LogEntry> {
        self.entries_for_date(date)
            .into_iter()
            .map(|(entry, item)| LogEntry::new(entry.grams, item.per_gram))
            .collect()
    }

    pub fn totals_for_date(&self, date: NaiveDate) -> Macros {
        calculator::calculate_consumed_totals(&self.log_entries_for_date(date))
    }

    // ── Bookkeeping ──────────────────────────────────────────────────────

    /// Drop duplicate ids (last occurrence wins), rebuild per-gram values
    /// from each item, and make sure new ids never collide with stored ones.
    pub(crate) fn normalize(&mut self) {
        self.items = dedup_by_id(std::mem::take(&mut self.items), |s| s.id);
        self.entries = dedup_by_id(std::mem::take(&mut self.entries), |e| e.id);

        for stored in &mut self.items {
            stored.per_gram =
                calculator::per_gram_macros(&stored.item.macros, stored.item.base_grams);
        }

        let max_item = self.items.iter().map(|s| s.id).max().unwrap_or(0);
        let max_entry = self.entries.iter().map(|e| e.id).max().unwrap_or(0);
        self.next_item_id = self.next_item_id.max(max_item.saturating_add(1));
        self.next_entry_id = self.next_entry_id.max(max_entry.saturating_add(1));
    }

    fn allocate_item_id(&mut self) -> Result<u64> {
        let id = self.next_item_id.max(1);
        if self.items.iter().any(|s| s.id == id) {
            return Err(TrackerError::InvalidInput("No item ids left".to_string()));
        }
        self.next_item_id = id.saturating_add(1);
        Ok(id)
    }

    fn allocate_entry_id(&mut self) -> Result<u64> {
        let id = self.next_entry_id.max(1);
        if self.entries.iter().any(|e| e.id == id) {
            return Err(TrackerError::InvalidInput("No entry ids left".to_string()));
        }
        self.next_entry_id = id.saturating_add(1);
        Ok(id)
    }
}

/// Keep the last record for each id, preserving first-seen order.
fn dedup_by_id<T>(records: Vec<T>, id: impl Fn(&T) -> u64) -> Vec<T> {
    let mut order: Vec<u64> = Vec::new();
    let mut seen: HashMap<u64, T> = HashMap::new();
    for record in records {
        let key = id(&record);
        if seen.insert(key, record).is_none() {
            order.push(key);
        }
    }
    order
        .into_iter()
        .filter_map(|key| seen.remove(&key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeightUnit;
    use assert_float_eq::assert_float_absolute_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn egg() -> FoodItem {
        FoodItem::new(
            "Egg",
            50.0,
            Macros {
                calories: 70.0,
                protein: 6.0,
                fat: 5.0,
                ..Macros::ZERO
            },
        )
    }

    fn rice() -> FoodItem {
        FoodItem::new(
            "Rice",
            100.0,
            Macros {
                calories: 130.0,
                carbs: 28.0,
                fiber: 0.4,
                protein: 2.7,
                ..Macros::ZERO
            },
        )
    }

    #[test]
    fn test_add_item_validates() {
        let mut state = TrackerState::new();

        let mut nameless = egg();
        nameless.name = "   ".to_string();
        assert!(matches!(state.add_item(nameless), Err(TrackerError::InvalidInput(_))));

        let mut massless = egg();
        massless.base_grams = 0.0;
        assert!(matches!(state.add_item(massless), Err(TrackerError::InvalidInput(_))));

        let mut padded = egg();
        padded.name = "  Egg ".to_string();
        let id = state.add_item(padded).unwrap();
        let stored = state.get_item(id).unwrap();
        assert_eq!(stored.item.name, "Egg");
        assert_eq!(stored.per_gram.calories, 70.0 / 50.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = TrackerState::new();
        let a = state.add_item(egg()).unwrap();
        let b = state.add_item(rice()).unwrap();
        assert_ne!(a, b);
        state.delete_item(b).unwrap();
        let c = state.add_item(rice()).unwrap();
        assert_ne!(b, c);
    }

    #[test]
    fn test_items_newest_first() {
        let mut state = TrackerState::new();
        let first = state.add_item(egg()).unwrap();
        let second = state.add_item(rice()).unwrap();
        let ids: Vec<u64> = state.items().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_find_item_case_insensitive() {
        let mut state = TrackerState::new();
        let id = state.add_item(egg()).unwrap();
        assert_eq!(state.find_item("EGG").map(|s| s.id), Some(id));
        assert!(state.find_item("bacon").is_none());
    }

    #[test]
    fn test_add_entry_requires_item_and_grams() {
        let mut state = TrackerState::new();
        let id = state.add_item(egg()).unwrap();
        assert!(state.add_entry(id + 100, 50.0, day(1)).is_err());
        assert!(state.add_entry(id, 0.0, day(1)).is_err());
        assert!(state.add_entry(id, -1.0, day(1)).is_err());
        assert!(state.add_entry(id, 50.0, day(1)).is_ok());
    }

    #[test]
    fn test_totals_for_date() {
        let mut state = TrackerState::new();
        let egg_id = state.add_item(egg()).unwrap();
        let rice_id = state.add_item(rice()).unwrap();
        state.add_entry(egg_id, 100.0, day(1)).unwrap();
        state.add_entry(rice_id, 200.0, day(1)).unwrap();
        state.add_entry(rice_id, 500.0, day(2)).unwrap();

        let totals = state.totals_for_date(day(1));
        assert_float_absolute_eq!(totals.calories, 400.0, 1e-9);
        assert_float_absolute_eq!(totals.carbs, 56.0, 1e-9);
        assert_float_absolute_eq!(totals.fat, 10.0, 1e-9);

        assert_eq!(state.entries_for_date(day(2)).len(), 1);
        assert_eq!(state.totals_for_date(day(3)), Macros::ZERO);
    }

    #[test]
    fn test_update_item_changes_totals() {
        let mut state = TrackerState::new();
        let id = state.add_item(egg()).unwrap();
        state.add_entry(id, 50.0, day(1)).unwrap();

        let mut bigger = egg();
        bigger.macros.calories = 90.0;
        state.update_item(id, bigger).unwrap();
        assert_float_absolute_eq!(state.totals_for_date(day(1)).calories, 90.0, 1e-9);

        assert!(matches!(
            state.update_item(999, egg()),
            Err(TrackerError::ItemNotFound(999))
        ));
    }

    #[test]
    fn test_delete_item_cascades() {
        let mut state = TrackerState::new();
        let egg_id = state.add_item(egg()).unwrap();
        let rice_id = state.add_item(rice()).unwrap();
        state.add_entry(egg_id, 100.0, day(1)).unwrap();
        state.add_entry(rice_id, 100.0, day(1)).unwrap();

        state.delete_item(egg_id).unwrap();
        let remaining = state.entries_for_date(day(1));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].1.id, rice_id);
        assert!(state.delete_item(egg_id).is_err());
    }

    #[test]
    fn test_update_entry_grams() {
        let mut state = TrackerState::new();
        let id = state.add_item(egg()).unwrap();
        let entry = state.add_entry(id, 50.0, day(1)).unwrap();

        assert!(state.update_entry_grams(entry, -3.0).is_err());
        assert!(!state.update_entry_grams(entry + 1, 10.0).unwrap());

        assert!(state.update_entry_grams(entry, 0.0).unwrap());
        assert_eq!(state.entries_for_date(day(1)).len(), 1);
        assert_eq!(state.totals_for_date(day(1)), Macros::ZERO);
    }

    #[test]
    fn test_delete_entry() {
        let mut state = TrackerState::new();
        let id = state.add_item(egg()).unwrap();
        let entry = state.add_entry(id, 50.0, day(1)).unwrap();
        state.delete_entry(entry).unwrap();
        assert!(state.entries_for_date(day(1)).is_empty());
        assert!(matches!(
            state.delete_entry(entry),
            Err(TrackerError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_settings_and_goals() {
        let mut state = TrackerState::new();
        assert_eq!(state.settings(), DEFAULTS);

        state.update_settings(&SettingsPatch {
            body_weight: Some(90.0),
            weight_unit: Some(WeightUnit::Kg),
            maintenance_calories: Some(2800.0),
            ..Default::default()
        });
        assert_eq!(state.adjust_calories(-250.0), -250.0);
        assert_eq!(state.adjust_calories(-250.0), -500.0);

        let goals = state.goals();
        assert_eq!(goals.calories, 2300.0);
        assert_float_absolute_eq!(goals.protein, 162.0, 1e-9);
        assert_eq!(goals.fiber, 25.0);
    }

    #[test]
    fn test_normalize_dedups_and_advances_ids() {
        let mut state = TrackerState::new();
        let id = state.add_item(egg()).unwrap();
        let mut duplicate = state.items[0].clone();
        duplicate.item.name = "Duck egg".to_string();
        state.items.push(duplicate);
        state.next_item_id = 0;

        state.normalize();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.get_item(id).unwrap().item.name, "Duck egg");
        assert_eq!(state.allocate_item_id().unwrap(), id + 1);
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        let mut state = TrackerState::new();

        for grams in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let mut item = egg();
            item.base_grams = grams;
            assert!(matches!(state.add_item(item), Err(TrackerError::InvalidInput(_))));
        }
        for value in [f64::INFINITY, f64::NAN] {
            let mut item = egg();
            item.macros.fat = value;
            assert!(matches!(state.add_item(item), Err(TrackerError::InvalidInput(_))));
        }
        let mut overflowing = egg();
        overflowing.base_grams = 0.5;
        overflowing.macros.calories = f64::MAX;
        assert!(matches!(state.add_item(overflowing), Err(TrackerError::InvalidInput(_))));
        assert!(state.items().is_empty());

        let id = state.add_item(egg()).unwrap();
        let mut bad_edit = egg();
        bad_edit.macros.calories = f64::NAN;
        assert!(state.update_item(id, bad_edit).is_err());
        assert_eq!(state.get_item(id).unwrap().item.macros.calories, 70.0);

        assert!(state.add_entry(id, f64::INFINITY, day(1)).is_err());
        assert!(state.add_entry(id, f64::NAN, day(1)).is_err());
        assert!(state.entries_for_date(day(1)).is_empty());

        let entry = state.add_entry(id, 50.0, day(1)).unwrap();
        assert!(state.update_entry_grams(entry, f64::NAN).is_err());
        assert!(state.update_entry_grams(entry, f64::INFINITY).is_err());
        assert_eq!(state.entries_for_date(day(1))[0].0.grams, 50.0);
    }

    #[test]
    fn test_ids_at_u64_max() {
        let mut state = TrackerState::new();
        let id = state.add_item(egg()).unwrap();
        state.items[0].id = u64::MAX;
        let entry = state.add_entry(u64::MAX, 10.0, day(1)).unwrap();
        state.entries.iter_mut().find(|e| e.id == entry).unwrap().id = u64::MAX;
        state.normalize();
        assert!(state.get_item(id).is_none());

        assert!(matches!(state.add_item(rice()), Err(TrackerError::InvalidInput(_))));
        assert!(matches!(
            state.add_entry(u64::MAX, 10.0, day(1)),
            Err(TrackerError::InvalidInput(_))
        ));
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn test_last_id_is_handed_out_once() {
        let mut state = TrackerState::new();
        state.next_item_id = u64::MAX;
        assert_eq!(state.add_item(egg()).unwrap(), u64::MAX);
        assert!(state.add_item(rice()).is_err());
    }

    #[test]
    fn test_normalize_rebuilds_per_gram() {
        let mut state = TrackerState::new();
        let id = state.add_item(egg()).unwrap();
        state.items[0].per_gram = Macros::ZERO;
        state.normalize();
        assert_eq!(state.get_item(id).unwrap().per_gram.calories, 70.0 / 50.0);
    }
}
