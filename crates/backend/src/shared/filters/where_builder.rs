use contracts::shared::filter::value::canonical_date;
use contracts::shared::filter::{
    Arity, FieldDescriptor, FilterCondition, FilterEngine, FilterSet, OperatorDescriptor,
    ValueType,
};

use super::entity_registry::RegisteredEntity;

/// WHERE clause body (without the keyword) and its bound parameters
#[derive(Debug, Clone, Default)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

impl WhereClause {
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Query parameter
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Text(String),
    Numeric(f64),
}

impl QueryParam {
    /// Parameter as display text
    pub fn to_display(&self) -> String {
        match self {
            QueryParam::Text(s) => s.clone(),
            QueryParam::Numeric(n) => n.to_string(),
        }
    }
}

/// Translates a filter set into a parameterized SQLite WHERE clause
pub struct WhereBuilder<'a> {
    entity: &'a RegisteredEntity,
}

impl<'a> WhereBuilder<'a> {
    pub fn new(entity: &'a RegisteredEntity) -> Self {
        Self { entity }
    }

    /// Build the clause.
    ///
    /// The set goes through the wire codec first, so the SQL covers exactly
    /// what a search request would carry: applicable rows only, last one wins
    /// per field.
    pub fn build(&self, filter_set: &FilterSet) -> Result<WhereClause, String> {
        let engine = FilterEngine::new(&self.entity.fields);
        let effective = engine.deserialize(&engine.serialize(filter_set));

        let mut fragments = Vec::new();
        let mut params = Vec::new();

        for condition in &effective.conditions {
            let Some((field, op)) = self.resolve(condition) else {
                continue;
            };
            let (sql, mut cond_params) = self.condition_to_sql(condition, field, op)?;
            fragments.push(format!("({})", sql));
            params.append(&mut cond_params);
        }

        let separator = format!(" {} ", filter_set.combinator.to_sql());
        Ok(WhereClause {
            sql: fragments.join(&separator),
            params,
        })
    }

    fn resolve(
        &self,
        condition: &FilterCondition,
    ) -> Option<(&'a FieldDescriptor, &'static OperatorDescriptor)> {
        let field = self.entity.fields.get(&condition.field_key)?;
        let op = field
            .operators()
            .iter()
            .find(|op| op.code == condition.operator_code)?;
        Some((field, op))
    }

    /// Build SQL fragment for one condition
    fn condition_to_sql(
        &self,
        condition: &FilterCondition,
        field: &FieldDescriptor,
        op: &OperatorDescriptor,
    ) -> Result<(String, Vec<QueryParam>), String> {
        let def = self
            .entity
            .schema
            .field(&field.key)
            .ok_or_else(|| format!("Field not found: {}", field.key))?;
        let column_ref = format!("{}.{}", self.entity.schema.table_name, def.db_column);
        let values = &condition.values;

        let expected = match op.arity {
            Arity::None => 0,
            Arity::Single => 1,
            Arity::Pair => 2,
            Arity::Multi => values.len().max(1),
        };
        if values.len() != expected {
            return Err(format!(
                "Operator '{}' on '{}' expects {} value(s), got {}",
                op.code,
                field.key,
                expected,
                values.len()
            ));
        }

        if field.value_type == ValueType::StringArray {
            return array_condition_to_sql(&column_ref, op.code, values);
        }

        let mut params = Vec::new();
        let sql = match op.code {
            "eq" | "ne" | "lt" | "lte" | "gt" | "gte" => {
                params.push(typed_param(&values[0], field.value_type)?);
                format!("{} {} ?", column_ref, comparison_to_sql(op.code))
            }
            "cn" | "nc" | "sw" | "ew" => {
                params.push(QueryParam::Text(like_pattern(op.code, &values[0])));
                let not = if op.code == "nc" { "NOT " } else { "" };
                format!("{} {}LIKE ? ESCAPE '\\'", column_ref, not)
            }
            "in" | "nin" => {
                for value in values {
                    params.push(typed_param(value, field.value_type)?);
                }
                let not = if op.code == "nin" { "NOT " } else { "" };
                format!("{} {}IN ({})", column_ref, not, placeholders(values.len()))
            }
            "bt" => {
                params.push(typed_param(&values[0], field.value_type)?);
                params.push(typed_param(&values[1], field.value_type)?);
                format!("{} BETWEEN ? AND ?", column_ref)
            }
            "isTrue" => format!("{} = 1", column_ref),
            "isFalse" => format!("{} = 0", column_ref),
            other => return Err(format!("Unsupported operator: {}", other)),
        };

        Ok((sql, params))
    }
}

/// Conditions on a JSON array column, matched element-wise
fn array_condition_to_sql(
    column_ref: &str,
    code: &str,
    values: &[String],
) -> Result<(String, Vec<QueryParam>), String> {
    let exists = |negated: bool, predicate: String| {
        format!(
            "{}EXISTS (SELECT 1 FROM json_each({}) WHERE json_each.value {})",
            if negated { "NOT " } else { "" },
            column_ref,
            predicate
        )
    };

    let result = match code {
        "eq" | "ne" => (
            exists(code == "ne", "= ?".to_string()),
            vec![QueryParam::Text(values[0].clone())],
        ),
        "cn" => (
            exists(false, "LIKE ? ESCAPE '\\'".to_string()),
            vec![QueryParam::Text(like_pattern("cn", &values[0]))],
        ),
        "in" | "nin" => (
            exists(code == "nin", format!("IN ({})", placeholders(values.len()))),
            values.iter().cloned().map(QueryParam::Text).collect(),
        ),
        other => return Err(format!("Unsupported list operator: {}", other)),
    };

    Ok(result)
}

fn comparison_to_sql(code: &str) -> &'static str {
    match code {
        "ne" => "<>",
        "lt" => "<",
        "lte" => "<=",
        "gt" => ">",
        "gte" => ">=",
        _ => "=",
    }
}

/// LIKE pattern with '%', '_' and '\' escaped
fn like_pattern(code: &str, value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    match code {
        "sw" => format!("{}%", escaped),
        "ew" => format!("%{}", escaped),
        _ => format!("%{}%", escaped),
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Typed parameter for the field's value type
fn typed_param(value: &str, value_type: ValueType) -> Result<QueryParam, String> {
    match value_type {
        ValueType::Number => value
            .parse::<f64>()
            .map(QueryParam::Numeric)
            .map_err(|_| format!("Invalid numeric value: {}", value)),
        // columns hold YYYY-MM-DD, timestamps are compared by their date
        ValueType::Date => canonical_date(value)
            .map(QueryParam::Text)
            .ok_or_else(|| format!("Invalid date value: {}", value)),
        _ => Ok(QueryParam::Text(value.to_string())),
    }
}
