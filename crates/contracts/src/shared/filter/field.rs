use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::error::FilterError;
use super::operator::{self, OperatorDescriptor};
use super::query_string::LOGIC_PARAM;
use super::value::VALUE_SEPARATOR;

/// Value type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    /// Free text
    String,
    /// List of strings (tags, assignees)
    StringArray,
    /// Integer or floating point
    Number,
    /// Calendar date (YYYY-MM-DD)
    Date,
    /// One of a fixed set of choices
    Enum,
    /// Flag
    Boolean,
}

impl ValueType {
    /// Get canonical name (same as the serialized form)
    pub fn canonical_name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::StringArray => "stringArray",
            ValueType::Number => "number",
            ValueType::Date => "date",
            ValueType::Enum => "enum",
            ValueType::Boolean => "boolean",
        }
    }
}

/// Describes one filterable attribute of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Unique key, dot-path allowed (e.g. "status.statusName")
    pub key: String,
    /// Human-readable name
    pub label: String,
    /// Type of the field value
    pub value_type: ValueType,
    /// Allowed values, only for enum fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_choices: Vec<String>,
}

impl FieldDescriptor {
    /// Create a descriptor for a non-enum field
    pub fn new(key: impl Into<String>, label: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value_type,
            enum_choices: Vec::new(),
        }
    }

    /// Create a descriptor for an enum field
    pub fn enumeration<I, S>(key: impl Into<String>, label: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            label: label.into(),
            value_type: ValueType::Enum,
            enum_choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Operators offered for this field, in display order
    pub fn operators(&self) -> &'static [OperatorDescriptor] {
        operator::operators_for(self.value_type)
    }

    /// Default operator when the field is newly selected
    pub fn default_operator(&self) -> &'static OperatorDescriptor {
        operator::default_operator(self.value_type)
    }

    fn check(&self) -> Result<(), FilterError> {
        let invalid = |reason: &str| FilterError::InvalidField {
            key: self.key.clone(),
            reason: reason.to_string(),
        };

        if self.key.trim().is_empty() {
            return Err(invalid("key must not be empty"));
        }
        if self.key == LOGIC_PARAM {
            return Err(invalid("key is reserved for the combinator parameter"));
        }
        match (self.value_type, self.enum_choices.is_empty()) {
            (ValueType::Enum, true) => Err(invalid("enum field requires choices")),
            (ValueType::Enum, false) => self.check_choices().map_err(invalid),
            (_, false) => Err(invalid("only enum fields may declare choices")),
            (_, true) => Ok(()),
        }
    }
}

impl FieldDescriptor {
    /// Choices travel comma-joined, so each must be non-empty, unique and free of ','
    fn check_choices(&self) -> Result<(), &'static str> {
        let mut seen = HashSet::new();
        for choice in &self.enum_choices {
            if choice.trim().is_empty() {
                return Err("enum choices must not be empty");
            }
            if choice.contains(VALUE_SEPARATOR) {
                return Err("enum choices must not contain ','");
            }
            if !seen.insert(choice.as_str()) {
                return Err("enum choices must be unique");
            }
        }
        Ok(())
    }
}

/// Set of filterable fields for one entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRegistry")]
pub struct FieldRegistry {
    /// Entity identifier (e.g. "task", "deal")
    entity: String,
    /// Fields in declaration order
    fields: Vec<FieldDescriptor>,
}

impl FieldRegistry {
    /// Build a registry, checking key uniqueness and enum choices
    pub fn new(entity: impl Into<String>, fields: Vec<FieldDescriptor>) -> Result<Self, FilterError> {
        let mut seen = HashSet::new();
        for field in &fields {
            field.check()?;
            if !seen.insert(field.key.as_str()) {
                return Err(FilterError::DuplicateField(field.key.clone()));
            }
        }

        Ok(Self {
            entity: entity.into(),
            fields,
        })
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Find a field by key
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Operators offered for a field, `UnknownField` if it is not registered
    pub fn operators_for(&self, key: &str) -> Result<&'static [OperatorDescriptor], FilterError> {
        self.get(key)
            .map(FieldDescriptor::operators)
            .ok_or_else(|| FilterError::UnknownField(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Deserialize)]
struct RawRegistry {
    entity: String,
    fields: Vec<FieldDescriptor>,
}

impl TryFrom<RawRegistry> for FieldRegistry {
    type Error = FilterError;

    fn try_from(raw: RawRegistry) -> Result<Self, Self::Error> {
        FieldRegistry::new(raw.entity, raw.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_rejects_duplicate_keys() {
        let result = FieldRegistry::new(
            "task",
            vec![
                FieldDescriptor::new("title", "Title", ValueType::String),
                FieldDescriptor::new("title", "Name", ValueType::String),
            ],
        );
        assert_eq!(result, Err(FilterError::DuplicateField("title".to_string())));
    }

    #[test]
    fn test_registry_enforces_enum_choices() {
        let missing = FieldRegistry::new(
            "task",
            vec![FieldDescriptor::enumeration("priority", "Priority", Vec::<String>::new())],
        );
        assert!(matches!(missing, Err(FilterError::InvalidField { .. })));

        let mut stray = FieldDescriptor::new("title", "Title", ValueType::String);
        stray.enum_choices = vec!["a".to_string()];
        let stray = FieldRegistry::new("task", vec![stray]);
        assert!(matches!(stray, Err(FilterError::InvalidField { .. })));
    }

    #[test]
    fn test_registry_rejects_unjoinable_choices() {
        for choices in [vec!["Acme, Inc", "Beta"], vec!["Open", " "], vec!["Open", "Open"]] {
            let result = FieldRegistry::new(
                "deal",
                vec![FieldDescriptor::enumeration("client", "Client", choices.clone())],
            );
            assert!(
                matches!(result, Err(FilterError::InvalidField { .. })),
                "{:?} should be rejected",
                choices
            );
        }
    }

    #[test]
    fn test_registry_rejects_reserved_key() {
        let result = FieldRegistry::new(
            "task",
            vec![FieldDescriptor::new(LOGIC_PARAM, "Logic", ValueType::String)],
        );
        assert!(matches!(result, Err(FilterError::InvalidField { .. })));
    }

    #[test]
    fn test_operators_for_field() {
        let registry = FieldRegistry::new(
            "task",
            vec![
                FieldDescriptor::new("status.statusName", "Status", ValueType::String),
                FieldDescriptor::new("done", "Done", ValueType::Boolean),
            ],
        )
        .unwrap();

        let codes: Vec<_> = registry
            .operators_for("done")
            .unwrap()
            .iter()
            .map(|op| op.code)
            .collect();
        assert_eq!(codes, vec!["isTrue", "isFalse"]);
        assert_eq!(registry.get("status.statusName").unwrap().default_operator().code, "eq");
        assert_eq!(
            registry.operators_for("missing"),
            Err(FilterError::UnknownField("missing".to_string()))
        );
    }

    #[test]
    fn test_registry_deserialize_validates() {
        let json = r#"{"entity":"deal","fields":[
            {"key":"stage","label":"Stage","value_type":"enum","enum_choices":["Open","Won"]},
            {"key":"tags","label":"Tags","value_type":"stringArray"}
        ]}"#;
        let registry: FieldRegistry = serde_json::from_str(json).unwrap();
        assert_eq!(registry.entity(), "deal");
        assert_eq!(registry.get("tags").unwrap().value_type, ValueType::StringArray);

        let bad = r#"{"entity":"deal","fields":[
            {"key":"stage","label":"Stage","value_type":"enum"}
        ]}"#;
        assert!(serde_json::from_str::<FieldRegistry>(bad).is_err());
    }
}
