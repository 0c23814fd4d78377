//! Value subtype rule: resolves a `simple`-tagged parser value down to
//! `boolean`, `numeric`, or `string`.

use crate::types::TypeTag;
use serde_json::Value;

const BOOLEAN_LITERALS: &[&str] = &[
    "да", "нет", "true", "false", "yes", "no", "есть", "отсутствует", "имеется",
    "не имеется", "1", "0", "вкл", "выкл", "включено", "выключено",
];

/// Parses `s` as a decimal using either `.` or `,` as the separator, the way
/// the source's `float(cleaned_value)` does after a comma-to-dot swap.
pub fn parse_decimal(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse::<f64>().ok()
}

fn is_boolean_literal(s: &str) -> bool {
    BOOLEAN_LITERALS.contains(&s.trim().to_lowercase().as_str())
}

/// Determines the final type tag for a `simple` value, per the subtype
/// rule: bool → boolean, numeric primitive → numeric, decimal-parsing
/// string → numeric, known boolean literal → boolean, otherwise string.
pub fn determine_value_subtype(value: &Value) -> TypeTag {
    match value {
        Value::Bool(_) => TypeTag::Boolean,
        Value::Number(_) => TypeTag::Numeric,
        Value::String(s) => {
            if parse_decimal(s).is_some() {
                TypeTag::Numeric
            } else if is_boolean_literal(s) {
                TypeTag::Boolean
            } else {
                TypeTag::String
            }
        }
        Value::Null => TypeTag::String,
        _ => TypeTag::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bool_primitive_is_boolean() {
        assert_eq!(determine_value_subtype(&json!(true)), TypeTag::Boolean);
    }

    #[test]
    fn numeric_primitive_is_numeric() {
        assert_eq!(determine_value_subtype(&json!(42.5)), TypeTag::Numeric);
    }

    #[test]
    fn decimal_string_with_comma_is_numeric() {
        assert_eq!(determine_value_subtype(&json!("3,14")), TypeTag::Numeric);
    }

    #[test]
    fn decimal_string_with_dot_is_numeric() {
        assert_eq!(determine_value_subtype(&json!("3.14")), TypeTag::Numeric);
    }

    #[test]
    fn boolean_literal_in_russian() {
        assert_eq!(determine_value_subtype(&json!("да")), TypeTag::Boolean);
        assert_eq!(determine_value_subtype(&json!("НЕТ")), TypeTag::Boolean);
    }

    #[test]
    fn other_strings_are_string() {
        assert_eq!(determine_value_subtype(&json!("карбон")), TypeTag::String);
    }
}
