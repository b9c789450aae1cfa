use serde::{Deserialize, Serialize};

/// Helper function for serde default
fn default_true() -> bool {
    true
}

/// One user-authored filter row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// Stable identifier for list reconciliation
    pub id: String,

    /// Field key; empty while the row is a placeholder
    #[serde(default)]
    pub field_key: String,

    /// Operator code; empty until chosen
    #[serde(default)]
    pub operator_code: String,

    /// Values, count constrained by the operator's arity
    #[serde(default)]
    pub values: Vec<String>,

    /// Whether this condition is applied to the query
    #[serde(default = "default_true")]
    pub active: bool,
}

impl FilterCondition {
    /// Create an empty placeholder row
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            field_key: String::new(),
            operator_code: String::new(),
            values: Vec::new(),
            active: true,
        }
    }

    /// Create a row with everything filled in
    pub fn with(
        field_key: impl Into<String>,
        operator_code: impl Into<String>,
        values: Vec<String>,
    ) -> Self {
        Self {
            field_key: field_key.into(),
            operator_code: operator_code.into(),
            values,
            ..Self::new()
        }
    }

    pub fn has_field(&self) -> bool {
        !self.field_key.is_empty()
    }

    pub fn has_operator(&self) -> bool {
        !self.operator_code.is_empty()
    }

    /// Same field, operator and values (ids and active flag ignored)
    pub fn same_predicate(&self, other: &FilterCondition) -> bool {
        self.field_key == other.field_key
            && self.operator_code == other.operator_code
            && self.values == other.values
    }
}

impl Default for FilterCondition {
    fn default() -> Self {
        Self::new()
    }
}

/// Logical join applied between all conditions of a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl Combinator {
    /// SQL keyword
    pub fn to_sql(&self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }

    /// Parse "and"/"or" in any case
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("and") {
            Some(Combinator::And)
        } else if value.eq_ignore_ascii_case("or") {
            Some(Combinator::Or)
        } else {
            None
        }
    }
}

/// Ordered collection of conditions plus the combinator joining them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub conditions: Vec<FilterCondition>,
    #[serde(default)]
    pub combinator: Combinator,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_conditions(conditions: Vec<FilterCondition>, combinator: Combinator) -> Self {
        Self {
            conditions,
            combinator,
        }
    }

    /// Append an empty row and return its id
    pub fn add_row(&mut self) -> String {
        let row = FilterCondition::new();
        let id = row.id.clone();
        self.conditions.push(row);
        id
    }

    /// Remove a row by id
    pub fn remove_row(&mut self, id: &str) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| c.id != id);
        self.conditions.len() != before
    }

    /// Replace the row with the same id, keeping its position
    pub fn replace_row(&mut self, condition: FilterCondition) -> bool {
        match self.conditions.iter_mut().find(|c| c.id == condition.id) {
            Some(slot) => {
                *slot = condition;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, id: &str) -> Option<&FilterCondition> {
        self.conditions.iter().find(|c| c.id == id)
    }

    /// Enable or disable a row
    pub fn set_active(&mut self, id: &str, active: bool) -> bool {
        match self.conditions.iter_mut().find(|c| c.id == id) {
            Some(row) => {
                row.active = active;
                true
            }
            None => false,
        }
    }

    pub fn set_combinator(&mut self, combinator: Combinator) {
        self.combinator = combinator;
    }

    /// Drop all rows, combinator back to AND
    pub fn clear(&mut self) {
        self.conditions.clear();
        self.combinator = Combinator::And;
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterCondition> {
        self.conditions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lifecycle() {
        let mut set = FilterSet::new();
        let first = set.add_row();
        let second = set.add_row();
        assert_eq!(set.len(), 2);
        assert_ne!(first, second);

        let mut edited = set.row(&second).unwrap().clone();
        edited.field_key = "title".to_string();
        assert!(set.replace_row(edited));
        assert_eq!(set.conditions[1].field_key, "title");

        assert!(set.remove_row(&first));
        assert!(!set.remove_row(&first));
        assert_eq!(set.len(), 1);
        assert_eq!(set.conditions[0].id, second);
    }

    #[test]
    fn test_replace_unknown_row_is_noop() {
        let mut set = FilterSet::new();
        set.add_row();
        assert!(!set.replace_row(FilterCondition::with("title", "eq", vec!["x".into()])));
        assert_eq!(set.len(), 1);
        assert!(!set.conditions[0].has_field());
    }

    #[test]
    fn test_set_active_toggles_row() {
        let mut set = FilterSet::new();
        let id = set.add_row();

        assert!(set.set_active(&id, false));
        assert!(!set.row(&id).unwrap().active);
        assert!(set.set_active(&id, true));
        assert!(set.row(&id).unwrap().active);
        assert!(!set.set_active("missing", false));
    }

    #[test]
    fn test_clear_resets_combinator() {
        let mut set = FilterSet::new();
        set.add_row();
        set.set_combinator(Combinator::Or);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.combinator, Combinator::And);
    }

    #[test]
    fn test_condition_serde_defaults() {
        let row: FilterCondition = serde_json::from_str(r#"{"id":"r1","field_key":"title"}"#).unwrap();
        assert!(row.active);
        assert!(!row.has_operator());
        assert!(row.values.is_empty());

        let set: FilterSet = serde_json::from_str(r#"{"combinator":"OR"}"#).unwrap();
        assert_eq!(set.combinator, Combinator::Or);
        assert!(set.is_empty());
    }

    #[test]
    fn test_combinator_parse() {
        assert_eq!(Combinator::parse("Or"), Some(Combinator::Or));
        assert_eq!(Combinator::parse("AND"), Some(Combinator::And));
        assert_eq!(Combinator::parse("xor"), None);
    }
}
