use crate::calculator::constants::LBS_PER_KG;
use crate::models::WeightUnit;

/// Body weight in kilograms.
#[inline]
pub fn convert_weight_to_kg(value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Lbs => value / LBS_PER_KG,
        WeightUnit::Kg => value,
    }
}

/// A "grams per unit of body weight" ratio expressed per kilogram.
///
/// A per-lb ratio grows by `LBS_PER_KG` since a kilogram holds that many pounds.
#[inline]
pub fn convert_ratio_to_per_kg(value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Lbs => value * LBS_PER_KG,
        WeightUnit::Kg => value,
    }
}

/// Inverse of [`convert_ratio_to_per_kg`].
#[inline]
pub fn ratio_for_unit(per_kg_value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Lbs => per_kg_value / LBS_PER_KG,
        WeightUnit::Kg => per_kg_value,
    }
}
