//! Raw input normalization and per-type value checks

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::field::{FieldDescriptor, ValueType};
use super::operator::Arity;

/// Separator between values on the wire and in list-style text inputs
pub const VALUE_SEPARATOR: char = ',';

/// Raw value input coming from the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ValueInput {
    /// Whole text of the input: a single value, "a,b,c" or "from,to"
    Text(String),
    /// One committed token (e.g. Enter in a tag input), appended to the current values
    Token(String),
    /// Already split values
    List(Vec<String>),
}

/// Turn raw input into the stored values for an operator of the given arity.
///
/// `current` is only consulted for `Token` input.
pub fn normalize(arity: Arity, current: &[String], input: ValueInput) -> Vec<String> {
    match arity {
        Arity::None => Vec::new(),
        Arity::Single => {
            let raw = match input {
                ValueInput::Text(s) | ValueInput::Token(s) => s,
                ValueInput::List(values) => values
                    .into_iter()
                    .find(|v| !v.trim().is_empty())
                    .unwrap_or_default(),
            };
            let value = raw.trim();
            if value.is_empty() {
                Vec::new()
            } else {
                vec![value.to_string()]
            }
        }
        Arity::Multi => {
            let raw: Vec<String> = match input {
                ValueInput::Text(s) => split_values(&s),
                ValueInput::Token(s) => current
                    .iter()
                    .cloned()
                    .chain(split_values(&s))
                    .collect(),
                ValueInput::List(values) => split_each(values),
            };
            dedupe(raw)
        }
        Arity::Pair => match input {
            ValueInput::Text(s) => split_values(&s).into_iter().map(trimmed).collect(),
            ValueInput::List(values) => split_each(values).into_iter().map(trimmed).collect(),
            ValueInput::Token(s) => {
                let mut values = current.to_vec();
                let token = s.trim();
                if values.len() < 2 && !token.is_empty() {
                    values.push(token.to_string());
                }
                values
            }
        },
    }
}

/// Split list-style text on the value separator (no trimming)
pub fn split_values(raw: &str) -> Vec<String> {
    raw.split(VALUE_SEPARATOR).map(str::to_string).collect()
}

/// Split every element, so a list and the same values typed as text agree
fn split_each(values: Vec<String>) -> Vec<String> {
    values.iter().flat_map(|v| split_values(v)).collect()
}

/// Trim, drop empties and duplicates, keep first occurrence order
fn dedupe(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

/// Whether a non-empty value parses for the field's type
pub fn is_valid_value(field: &FieldDescriptor, value: &str) -> bool {
    match field.value_type {
        ValueType::Number => value.parse::<f64>().map(f64::is_finite).unwrap_or(false),
        ValueType::Date => is_date(value),
        ValueType::Enum => field.enum_choices.iter().any(|choice| choice == value),
        ValueType::String | ValueType::StringArray | ValueType::Boolean => true,
    }
}

/// YYYY-MM-DD or a full RFC 3339 timestamp
pub fn is_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// Date value as YYYY-MM-DD; a timestamp keeps the calendar date of its own offset
pub fn canonical_date(value: &str) -> Option<String> {
    parse_date(value).map(|date| date.format("%Y-%m-%d").to_string())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_single_trims_and_treats_empty_as_unset() {
        assert_eq!(normalize(Arity::Single, &[], ValueInput::Text("  Active ".into())), strings(&["Active"]));
        assert!(normalize(Arity::Single, &[], ValueInput::Text("   ".into())).is_empty());
    }

    #[test]
    fn test_multi_token_and_text_agree() {
        let mut values: Vec<String> = Vec::new();
        for token in ["High", " Critical", "High", ""] {
            values = normalize(Arity::Multi, &values, ValueInput::Token(token.into()));
        }
        let from_text = normalize(Arity::Multi, &[], ValueInput::Text("High, Critical,,High".into()));
        assert_eq!(values, strings(&["High", "Critical"]));
        assert_eq!(values, from_text);
    }

    #[test]
    fn test_pair_keeps_partial_input() {
        assert_eq!(
            normalize(Arity::Pair, &[], ValueInput::Text("2025-01-01, 2025-01-31".into())),
            strings(&["2025-01-01", "2025-01-31"])
        );
        assert_eq!(normalize(Arity::Pair, &[], ValueInput::Text("10".into())), strings(&["10"]));

        let one = normalize(Arity::Pair, &[], ValueInput::Token("1".into()));
        let two = normalize(Arity::Pair, &one, ValueInput::Token("5".into()));
        let still_two = normalize(Arity::Pair, &two, ValueInput::Token("9".into()));
        assert_eq!(still_two, strings(&["1", "5"]));
    }

    #[test]
    fn test_list_input_splits_like_text() {
        let from_list = normalize(Arity::Multi, &[], ValueInput::List(strings(&["Acme, Inc", "Beta"])));
        let from_text = normalize(Arity::Multi, &[], ValueInput::Text("Acme, Inc,Beta".into()));
        assert_eq!(from_list, strings(&["Acme", "Inc", "Beta"]));
        assert_eq!(from_list, from_text);

        let range = normalize(Arity::Pair, &[], ValueInput::List(strings(&["1, 5"])));
        assert_eq!(range, strings(&["1", "5"]));
    }

    #[test]
    fn test_canonical_date() {
        assert_eq!(canonical_date("2025-01-31").as_deref(), Some("2025-01-31"));
        assert_eq!(canonical_date("2025-01-31T23:30:00+03:00").as_deref(), Some("2025-01-31"));
        assert_eq!(canonical_date("31.01.2025"), None);
    }

    #[test]
    fn test_none_discards_input() {
        assert!(normalize(Arity::None, &strings(&["x"]), ValueInput::Text("y".into())).is_empty());
    }

    #[test]
    fn test_value_checks() {
        let amount = FieldDescriptor::new("amount", "Amount", ValueType::Number);
        assert!(is_valid_value(&amount, "12.5"));
        assert!(is_valid_value(&amount, "-3"));
        assert!(!is_valid_value(&amount, "12,5"));
        assert!(!is_valid_value(&amount, "NaN"));

        let due = FieldDescriptor::new("dueDate", "Due date", ValueType::Date);
        assert!(is_valid_value(&due, "2025-01-31"));
        assert!(is_valid_value(&due, "2025-01-31T10:00:00Z"));
        assert!(!is_valid_value(&due, "2025-02-30"));
        assert!(!is_valid_value(&due, "31.01.2025"));

        let priority = FieldDescriptor::enumeration("priority", "Priority", ["Low", "High"]);
        assert!(is_valid_value(&priority, "High"));
        assert!(!is_valid_value(&priority, "high"));
    }
}
