use serde_json::Value;

use crate::models::WeightUnit;

/// Read a raw scalar as `f64`, never failing.
///
/// Absent, null and empty-string values give `fallback`. Numbers pass
/// through, booleans read as 1.0 / 0.0 and strings are parsed after
/// trimming. Anything unparsable gives `fallback`.
pub fn safe_float(value: Option<&Value>, fallback: f64) -> f64 {
    match value {
        None | Some(Value::Null) => fallback,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(fallback),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::String(s)) if s.is_empty() => fallback,
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("Could not read {:?} as a number, using {}", s, fallback);
                fallback
            }
        },
        Some(other) => {
            tracing::warn!("Expected a number but got {}, using {}", other, fallback);
            fallback
        }
    }
}

/// Read a raw unit. Non-strings, empty and unknown strings are kg.
pub fn unit_from_value(value: Option<&Value>) -> WeightUnit {
    WeightUnit::parse(value.and_then(Value::as_str))
}

/// Look up `key` in a raw mapping; non-objects have no keys.
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_object().and_then(|map| map.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_empty_use_fallback() {
        assert_eq!(safe_float(None, 0.0), 0.0);
        assert_eq!(safe_float(Some(&Value::Null), 7.0), 7.0);
        assert_eq!(safe_float(Some(&json!("")), 5.0), 5.0);
    }

    #[test]
    fn test_parses_numbers_and_strings() {
        assert_eq!(safe_float(Some(&json!("3.5")), 0.0), 3.5);
        assert_eq!(safe_float(Some(&json!(" 42 ")), 0.0), 42.0);
        assert_eq!(safe_float(Some(&json!(-12)), 0.0), -12.0);
        assert_eq!(safe_float(Some(&json!(2.25)), 0.0), 2.25);
        assert_eq!(safe_float(Some(&json!("1e3")), 0.0), 1000.0);
    }

    #[test]
    fn test_garbage_uses_fallback() {
        assert_eq!(safe_float(Some(&json!("abc")), 0.0), 0.0);
        assert_eq!(safe_float(Some(&json!("   ")), 9.0), 9.0);
        assert_eq!(safe_float(Some(&json!([1])), 4.0), 4.0);
        assert_eq!(safe_float(Some(&json!({"a": 1})), 4.0), 4.0);
    }

    #[test]
    fn test_booleans() {
        assert_eq!(safe_float(Some(&json!(true)), 0.0), 1.0);
        assert_eq!(safe_float(Some(&json!(false)), 5.0), 0.0);
    }

    #[test]
    fn test_unit_from_value() {
        assert_eq!(unit_from_value(Some(&json!("Lbs"))), WeightUnit::Lbs);
        assert_eq!(unit_from_value(Some(&json!("kg"))), WeightUnit::Kg);
        assert_eq!(unit_from_value(Some(&json!(5))), WeightUnit::Kg);
        assert_eq!(unit_from_value(Some(&Value::Null)), WeightUnit::Kg);
        assert_eq!(unit_from_value(None), WeightUnit::Kg);
    }

    #[test]
    fn test_field_on_non_object() {
        assert!(field(&json!("text"), "grams").is_none());
        assert_eq!(field(&json!({"grams": 3}), "grams"), Some(&json!(3)));
    }
}
