//! Wire codec: `FilterSet` <-> `field -> "operator:value"` map

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::condition::{Combinator, FilterCondition, FilterSet};
use super::engine::FilterEngine;
use super::operator::{self, Arity};
use super::value::{split_values, VALUE_SEPARATOR};

/// Separator between operator code and values
pub const OPERATOR_SEPARATOR: char = ':';

/// Flat mapping sent to search endpoints, e.g. `priority -> "in:High,Critical"`.
///
/// Keeps insertion order; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SerializedQuery {
    entries: Vec<(String, String)>,
}

impl SerializedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite (last one wins)
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SerializedQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = SerializedQuery::new();
        for (k, v) in iter {
            query.insert(k, v);
        }
        query
    }
}

impl Serialize for SerializedQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SerializedQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct QueryVisitor;

        impl<'de> Visitor<'de> for QueryVisitor {
            type Value = SerializedQuery;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of field keys to \"operator:value\" strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut query = SerializedQuery::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    query.insert(key, value);
                }
                Ok(query)
            }
        }

        deserializer.deserialize_map(QueryVisitor)
    }
}

impl<'a> FilterEngine<'a> {
    /// Encode every applicable condition, in list order; the rest are dropped
    pub fn serialize(&self, filter_set: &FilterSet) -> SerializedQuery {
        let mut query = SerializedQuery::new();

        for condition in &filter_set.conditions {
            if !self.is_applicable(condition) {
                tracing::trace!("Filter row {} skipped: incomplete or inactive", condition.id);
                continue;
            }
            if let Some(encoded) = self.encode(condition) {
                query.insert(condition.field_key.clone(), encoded);
            }
        }

        query
    }

    /// Hydrate editable rows from a serialized query.
    ///
    /// Entries with an unknown field or an operator not offered for the field's
    /// type are dropped; hydration itself never fails.
    pub fn deserialize(&self, query: &SerializedQuery) -> FilterSet {
        let conditions = query
            .iter()
            .filter_map(|(key, raw)| self.decode(key, raw))
            .collect();

        FilterSet::from_conditions(conditions, Combinator::And)
    }

    fn encode(&self, condition: &FilterCondition) -> Option<String> {
        let (_, op) = self.resolve(condition)?;
        let encoded = match op.arity {
            Arity::None => op.code.to_string(),
            Arity::Single => format!(
                "{}{}{}",
                op.code,
                OPERATOR_SEPARATOR,
                condition.values.first()?
            ),
            Arity::Multi | Arity::Pair => format!(
                "{}{}{}",
                op.code,
                OPERATOR_SEPARATOR,
                condition.values.join(&VALUE_SEPARATOR.to_string())
            ),
        };
        Some(encoded)
    }

    fn decode(&self, key: &str, raw: &str) -> Option<FilterCondition> {
        let Some(field) = self.registry().get(key) else {
            tracing::debug!(
                "Dropping filter entry '{}': field not in '{}' registry",
                key,
                self.registry().entity()
            );
            return None;
        };

        let (code, rest) = match raw.split_once(OPERATOR_SEPARATOR) {
            Some((code, rest)) => (code, Some(rest)),
            None => (raw, None),
        };

        let Some(op) = operator::find_for(field.value_type, code) else {
            tracing::debug!(
                "Dropping filter entry '{}': operator '{}' not valid for {}",
                key,
                code,
                field.value_type.canonical_name()
            );
            return None;
        };

        let values = match (op.arity, rest) {
            (Arity::None, _) | (_, None) => Vec::new(),
            (Arity::Single, Some(rest)) => vec![rest.to_string()],
            (Arity::Multi | Arity::Pair, Some(rest)) => split_values(rest),
        };

        Some(FilterCondition::with(field.key.clone(), op.code, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::filter::engine::tests::task_registry;
    use crate::shared::filter::field::FieldRegistry;
    use crate::shared::filter::value::ValueInput;

    fn row(field: &str, op: &str, values: &[&str]) -> FilterCondition {
        FilterCondition::with(field, op, values.iter().map(|v| v.to_string()).collect())
    }

    fn set(rows: Vec<FilterCondition>) -> FilterSet {
        FilterSet::from_conditions(rows, Combinator::And)
    }

    #[test]
    fn test_serialize_scenarios() {
        let registry = task_registry();
        let engine = FilterEngine::new(&registry);

        let query = engine.serialize(&set(vec![
            row("priority", "in", &["High", "Critical"]),
            row("dueDate", "bt", &["2025-01-01", "2025-01-31"]),
            row("description", "cn", &[""]),
            row("billable", "isTrue", &[]),
        ]));

        assert_eq!(query.get("priority"), Some("in:High,Critical"));
        assert_eq!(query.get("dueDate"), Some("bt:2025-01-01,2025-01-31"));
        assert!(!query.contains_key("description"));
        assert_eq!(query.get("billable"), Some("isTrue"));
        assert_eq!(query.len(), 3);
    }

    #[test]
    fn test_serialize_single_value_is_raw() {
        let registry = task_registry();
        let engine = FilterEngine::new(&registry);

        let query = engine.serialize(&set(vec![row("description", "cn", &["a,b: c"])]));
        assert_eq!(query.get("description"), Some("cn:a,b: c"));

        let hydrated = engine.deserialize(&query);
        assert_eq!(hydrated.conditions[0].values, vec!["a,b: c".to_string()]);
    }

    #[test]
    fn test_last_wins_on_duplicate_keys() {
        let registry = task_registry();
        let engine = FilterEngine::new(&registry);

        let query = engine.serialize(&set(vec![
            row("tags", "in", &["urgent"]),
            row("status", "eq", &["Active"]),
            row("tags", "nin", &["archived"]),
        ]));

        assert_eq!(query.get("tags"), Some("nin:archived"));
        // replaced in place, not moved to the end
        assert_eq!(query.keys().collect::<Vec<_>>(), vec!["tags", "status"]);
    }

    #[test]
    fn test_incomplete_rows_never_leak_keys() {
        let registry = task_registry();
        let engine = FilterEngine::new(&registry);

        let inactive = row("status", "eq", &["Done"]);
        let inactive_id = inactive.id.clone();

        let mut rows = set(vec![
            FilterCondition::new(),
            row("estimate", "bt", &["1"]),
            row("estimate", "gt", &["many"]),
            row("dueDate", "lt", &["yesterday"]),
            inactive,
        ]);
        rows.set_active(&inactive_id, false);

        assert!(engine.serialize(&rows).is_empty());
        rows.set_active(&inactive_id, true);
        assert_eq!(engine.serialize(&rows).get("status"), Some("eq:Done"));
    }

    #[test]
    fn test_incomplete_row_does_not_hide_complete_duplicate() {
        let registry = task_registry();
        let engine = FilterEngine::new(&registry);

        let query = engine.serialize(&set(vec![
            row("status", "eq", &["Active"]),
            row("status", "ne", &[]),
        ]));
        assert_eq!(query.get("status"), Some("eq:Active"));
    }

    #[test]
    fn test_deserialize_drops_unknown_entries() {
        let registry = task_registry();
        let engine = FilterEngine::new(&registry);

        let query: SerializedQuery = [
            ("owner", "eq:Alice"),
            ("dueDate", "cn:2025"),
            ("billable", "eq:true"),
            ("estimate", "gte:3"),
        ]
        .into_iter()
        .collect();

        let hydrated = engine.deserialize(&query);
        assert_eq!(hydrated.len(), 1);
        assert!(hydrated.conditions[0].same_predicate(&row("estimate", "gte", &["3"])));
        assert!(hydrated.conditions[0].active);
    }

    #[test]
    fn test_deserialize_unregistered_status_yields_empty_set() {
        let registry = FieldRegistry::new("contact", vec![]).unwrap();
        let engine = FilterEngine::new(&registry);

        let query: SerializedQuery = [("status", "eq:Active")].into_iter().collect();
        assert!(engine.deserialize(&query).is_empty());
    }

    #[test]
    fn test_deserialize_splits_lists_and_bare_codes() {
        let registry = task_registry();
        let engine = FilterEngine::new(&registry);

        let query: SerializedQuery = [
            ("priority", "in:High,Critical"),
            ("dueDate", "bt:2025-01-01,2025-01-31"),
            ("billable", "isFalse"),
            ("status", "eq"),
        ]
        .into_iter()
        .collect();

        let hydrated = engine.deserialize(&query);
        let rows: Vec<_> = hydrated.iter().collect();
        assert!(rows[0].same_predicate(&row("priority", "in", &["High", "Critical"])));
        assert!(rows[1].same_predicate(&row("dueDate", "bt", &["2025-01-01", "2025-01-31"])));
        assert!(rows[2].same_predicate(&row("billable", "isFalse", &[])));
        // hydrated but incomplete: kept for editing, not re-serialized
        assert!(rows[3].same_predicate(&row("status", "eq", &[])));
        assert!(!engine.is_complete(rows[3]));
    }

    #[test]
    fn test_round_trip_and_idempotence() {
        let registry = task_registry();
        let engine = FilterEngine::new(&registry);

        let original = set(vec![
            row("status", "sw", &["In "]),
            FilterCondition::new(),
            row("tags", "cn", &["ops"]),
            row("estimate", "in", &["1", "2.5", "8"]),
            row("priority", "ne", &["Low"]),
            row("dueDate", "gte", &["2025-03-01"]),
            row("billable", "isTrue", &[]),
        ]);

        let query = engine.serialize(&original);
        let hydrated = engine.deserialize(&query);

        let expected: Vec<_> = original
            .iter()
            .filter(|c| engine.is_complete(c))
            .collect();
        assert_eq!(hydrated.len(), expected.len());
        for (got, want) in hydrated.iter().zip(expected) {
            assert!(got.same_predicate(want), "{:?} != {:?}", got, want);
        }

        assert_eq!(engine.serialize(&hydrated), query);
    }

    #[test]
    fn test_round_trip_with_separator_in_list_input() {
        let registry = task_registry();
        let engine = FilterEngine::new(&registry);

        let base = engine.select_field(&FilterCondition::new(), "status").unwrap();
        let base = engine.select_operator(&base, "in").unwrap();
        let edited = engine.set_value(&base, ValueInput::List(vec!["Acme, Inc".into()]));
        assert_eq!(edited.values, vec!["Acme".to_string(), "Inc".to_string()]);

        let original = set(vec![edited.clone()]);
        let query = engine.serialize(&original);
        let hydrated = engine.deserialize(&query);
        assert_eq!(hydrated.len(), 1);
        assert!(hydrated.conditions[0].same_predicate(&edited));
        assert_eq!(engine.serialize(&hydrated), query);

        // stored directly, bypassing normalization: never sent
        let raw = row("status", "in", &["Acme, Inc"]);
        assert!(engine.serialize(&set(vec![raw])).is_empty());
    }

    #[test]
    fn test_serialized_query_json_keeps_order() {
        let query: SerializedQuery = [("status", "eq:Active"), ("priority", "in:High,Critical")]
            .into_iter()
            .collect();

        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(json, r#"{"status":"eq:Active","priority":"in:High,Critical"}"#);

        let back: SerializedQuery =
            serde_json::from_str(r#"{"priority":"in:High","status":"eq:Active"}"#).unwrap();
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["priority", "status"]);
    }
}
