use serde::{Deserialize, Serialize};

use super::field::ValueType;

/// Number of values an operator takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// No value (isEmpty, isTrue, ...)
    None,
    /// Exactly one value
    Single,
    /// Open list of values
    Multi,
    /// Exactly two values (from, to)
    Pair,
}

impl Arity {
    /// Whether values are joined with ',' on the wire
    pub fn is_list(&self) -> bool {
        matches!(self, Arity::Multi | Arity::Pair)
    }
}

/// Comparison / predicate operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorDescriptor {
    /// Wire code (e.g. "eq", "bt")
    pub code: &'static str,
    /// Display label for UI
    pub label: &'static str,
    pub arity: Arity,
}

const fn op(code: &'static str, label: &'static str, arity: Arity) -> OperatorDescriptor {
    OperatorDescriptor { code, label, arity }
}

pub const EQ: OperatorDescriptor = op("eq", "equals", Arity::Single);
pub const NE: OperatorDescriptor = op("ne", "not equals", Arity::Single);
pub const CN: OperatorDescriptor = op("cn", "contains", Arity::Single);
pub const NC: OperatorDescriptor = op("nc", "does not contain", Arity::Single);
pub const SW: OperatorDescriptor = op("sw", "starts with", Arity::Single);
pub const EW: OperatorDescriptor = op("ew", "ends with", Arity::Single);
pub const IN: OperatorDescriptor = op("in", "in list", Arity::Multi);
pub const NIN: OperatorDescriptor = op("nin", "not in list", Arity::Multi);
pub const LT: OperatorDescriptor = op("lt", "less than", Arity::Single);
pub const LTE: OperatorDescriptor = op("lte", "less or equal", Arity::Single);
pub const GT: OperatorDescriptor = op("gt", "greater than", Arity::Single);
pub const GTE: OperatorDescriptor = op("gte", "greater or equal", Arity::Single);
pub const BT: OperatorDescriptor = op("bt", "between", Arity::Pair);
pub const IS_EMPTY: OperatorDescriptor = op("isEmpty", "is empty", Arity::None);
pub const IS_NOT_EMPTY: OperatorDescriptor = op("isNotEmpty", "is not empty", Arity::None);
pub const IS_TRUE: OperatorDescriptor = op("isTrue", "is true", Arity::None);
pub const IS_FALSE: OperatorDescriptor = op("isFalse", "is false", Arity::None);

/// Every known operator
pub const CATALOG: &[OperatorDescriptor] = &[
    EQ, NE, CN, NC, SW, EW, IN, NIN, LT, LTE, GT, GTE, BT, IS_EMPTY, IS_NOT_EMPTY, IS_TRUE,
    IS_FALSE,
];

const STRING_OPS: &[OperatorDescriptor] = &[EQ, NE, CN, NC, SW, EW, IN, NIN];

// Same codes, list-flavoured labels
const STRING_ARRAY_OPS: &[OperatorDescriptor] = &[
    OperatorDescriptor { label: "has value", ..EQ },
    OperatorDescriptor { label: "excludes", ..NE },
    OperatorDescriptor { label: "any item contains", ..CN },
    OperatorDescriptor { label: "has any of", ..IN },
    OperatorDescriptor { label: "has none of", ..NIN },
];

const NUMBER_OPS: &[OperatorDescriptor] = &[EQ, NE, LT, LTE, GT, GTE, BT, IN];
const DATE_OPS: &[OperatorDescriptor] = &[EQ, NE, LT, LTE, GT, GTE, BT];
const ENUM_OPS: &[OperatorDescriptor] = &[EQ, NE, IN, NIN];
const BOOLEAN_OPS: &[OperatorDescriptor] = &[IS_TRUE, IS_FALSE];

/// Operators offered for a value type, in display order
pub fn operators_for(value_type: ValueType) -> &'static [OperatorDescriptor] {
    match value_type {
        ValueType::String => STRING_OPS,
        ValueType::StringArray => STRING_ARRAY_OPS,
        ValueType::Number => NUMBER_OPS,
        ValueType::Date => DATE_OPS,
        ValueType::Enum => ENUM_OPS,
        ValueType::Boolean => BOOLEAN_OPS,
    }
}

/// First operator of the type's list
pub fn default_operator(value_type: ValueType) -> &'static OperatorDescriptor {
    &operators_for(value_type)[0]
}

/// Find an operator offered for the value type
pub fn find_for(value_type: ValueType, code: &str) -> Option<&'static OperatorDescriptor> {
    operators_for(value_type).iter().find(|op| op.code == code)
}

/// Find an operator in the full catalog
pub fn find(code: &str) -> Option<&'static OperatorDescriptor> {
    CATALOG.iter().find(|op| op.code == code)
}

/// Owned operator description for API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorInfo {
    pub code: String,
    pub label: String,
    pub arity: Arity,
}

impl From<&OperatorDescriptor> for OperatorInfo {
    fn from(op: &OperatorDescriptor) -> Self {
        Self {
            code: op.code.to_string(),
            label: op.label.to_string(),
            arity: op.arity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(value_type: ValueType) -> Vec<&'static str> {
        operators_for(value_type).iter().map(|op| op.code).collect()
    }

    #[test]
    fn test_operator_mapping() {
        assert_eq!(codes(ValueType::String), vec!["eq", "ne", "cn", "nc", "sw", "ew", "in", "nin"]);
        assert_eq!(codes(ValueType::StringArray), vec!["eq", "ne", "cn", "in", "nin"]);
        assert_eq!(codes(ValueType::Number), vec!["eq", "ne", "lt", "lte", "gt", "gte", "bt", "in"]);
        assert_eq!(codes(ValueType::Date), vec!["eq", "ne", "lt", "lte", "gt", "gte", "bt"]);
        assert_eq!(codes(ValueType::Enum), vec!["eq", "ne", "in", "nin"]);
        assert_eq!(codes(ValueType::Boolean), vec!["isTrue", "isFalse"]);
    }

    #[test]
    fn test_string_array_labels() {
        let has_any = find_for(ValueType::StringArray, "in").unwrap();
        assert_eq!(has_any.label, "has any of");
        assert_eq!(has_any.arity, Arity::Multi);
        assert_eq!(find_for(ValueType::String, "in").unwrap().label, "in list");
    }

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(find("bt").unwrap().arity, Arity::Pair);
        assert_eq!(find("isEmpty").unwrap().arity, Arity::None);
        assert!(find("like").is_none());
        assert!(find_for(ValueType::Date, "cn").is_none());
    }
}
