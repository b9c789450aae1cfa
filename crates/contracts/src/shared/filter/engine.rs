use super::condition::FilterCondition;
use super::error::FilterError;
use super::field::{FieldDescriptor, FieldRegistry};
use super::operator::{self, Arity, OperatorDescriptor};
use super::value::{self, ValueInput, VALUE_SEPARATOR};

/// Edits and validates filter conditions against one field registry.
///
/// Every operation takes a condition snapshot and returns a new one; the
/// engine holds no state besides the borrowed registry.
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine<'a> {
    registry: &'a FieldRegistry,
}

impl<'a> FilterEngine<'a> {
    pub fn new(registry: &'a FieldRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a FieldRegistry {
        self.registry
    }

    /// Point the condition at another field: operator reset to the type default, values cleared
    pub fn select_field(
        &self,
        condition: &FilterCondition,
        field_key: &str,
    ) -> Result<FilterCondition, FilterError> {
        let field = self
            .registry
            .get(field_key)
            .ok_or_else(|| FilterError::UnknownField(field_key.to_string()))?;

        Ok(FilterCondition {
            field_key: field.key.clone(),
            operator_code: field.default_operator().code.to_string(),
            values: Vec::new(),
            ..condition.clone()
        })
    }

    /// Change the operator; values are cleared when the new operator takes none
    pub fn select_operator(
        &self,
        condition: &FilterCondition,
        operator_code: &str,
    ) -> Result<FilterCondition, FilterError> {
        let not_applicable = || FilterError::OperatorNotApplicable {
            field: condition.field_key.clone(),
            operator: operator_code.to_string(),
        };

        let field = self.registry.get(&condition.field_key).ok_or_else(not_applicable)?;
        let op = operator::find_for(field.value_type, operator_code).ok_or_else(not_applicable)?;

        let values = if op.arity == Arity::None {
            Vec::new()
        } else {
            condition.values.clone()
        };

        Ok(FilterCondition {
            operator_code: op.code.to_string(),
            values,
            ..condition.clone()
        })
    }

    /// Store raw input as values, shaped by the current operator's arity.
    ///
    /// Without a resolvable operator the condition is returned unchanged.
    pub fn set_value(&self, condition: &FilterCondition, input: ValueInput) -> FilterCondition {
        match self.resolve(condition) {
            Some((_, op)) => FilterCondition {
                values: value::normalize(op.arity, &condition.values, input),
                ..condition.clone()
            },
            None => {
                tracing::trace!(
                    "Filter row {}: value ignored, no operator selected",
                    condition.id
                );
                condition.clone()
            }
        }
    }

    /// Field and operator set, and values satisfy the operator's arity and the field's type
    pub fn is_complete(&self, condition: &FilterCondition) -> bool {
        let Some((field, op)) = self.resolve(condition) else {
            return false;
        };

        let values = &condition.values;
        let count_ok = match op.arity {
            Arity::None => return true,
            Arity::Single => values.len() == 1,
            Arity::Pair => values.len() == 2,
            Arity::Multi => !values.is_empty(),
        };

        // a list element holding the separator would split differently on the way back
        let joinable = |v: &String| !op.arity.is_list() || !v.contains(VALUE_SEPARATOR);

        count_ok
            && values
                .iter()
                .all(|v| !v.trim().is_empty() && joinable(v) && value::is_valid_value(field, v))
    }

    /// Complete and enabled: the condition takes part in the query
    pub fn is_applicable(&self, condition: &FilterCondition) -> bool {
        condition.active && self.is_complete(condition)
    }

    /// Operators the editor should offer for the condition's field
    pub fn operators_for(&self, condition: &FilterCondition) -> &'static [OperatorDescriptor] {
        self.registry
            .get(&condition.field_key)
            .map(FieldDescriptor::operators)
            .unwrap_or(&[])
    }

    /// Chip text for the condition, e.g. "Priority in list [High, Critical]"
    pub fn describe(&self, condition: &FilterCondition) -> String {
        let Some(field) = self.registry.get(&condition.field_key) else {
            return "(empty)".to_string();
        };
        let Some(op) = operator::find_for(field.value_type, &condition.operator_code) else {
            return field.label.clone();
        };

        match op.arity {
            Arity::None => format!("{} {}", field.label, op.label),
            Arity::Single => format!(
                "{} {} {}",
                field.label,
                op.label,
                condition.values.first().map(String::as_str).unwrap_or("…")
            ),
            Arity::Pair => format!(
                "{} {} {} and {}",
                field.label,
                op.label,
                condition.values.first().map(String::as_str).unwrap_or("…"),
                condition.values.get(1).map(String::as_str).unwrap_or("…")
            ),
            Arity::Multi if condition.values.len() <= 3 => format!(
                "{} {} [{}]",
                field.label,
                op.label,
                condition.values.join(", ")
            ),
            Arity::Multi => format!(
                "{} {} ({} values)",
                field.label,
                op.label,
                condition.values.len()
            ),
        }
    }

    /// Field and operator of a condition, if both are known and compatible
    pub(crate) fn resolve(
        &self,
        condition: &FilterCondition,
    ) -> Option<(&'a FieldDescriptor, &'static OperatorDescriptor)> {
        let field = self.registry.get(&condition.field_key)?;
        let op = operator::find_for(field.value_type, &condition.operator_code)?;
        Some((field, op))
    }
}
