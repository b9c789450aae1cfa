//! Static filter schemas, one per filterable entity

pub mod activity;
pub mod contact;
pub mod deal;
pub mod lead;
pub mod project;
pub mod task;

use contracts::shared::filter::{FieldDescriptor, ValueType};

pub use activity::ACTIVITY_SCHEMA;
pub use contact::CONTACT_SCHEMA;
pub use deal::DEAL_SCHEMA;
pub use lead::LEAD_SCHEMA;
pub use project::PROJECT_SCHEMA;
pub use task::TASK_SCHEMA;

/// Filterable entity definition (static version)
#[derive(Debug, Clone)]
pub struct EntitySchema {
    /// Entity identifier used in URLs (e.g. "task")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Database table searched by the entity's list endpoint
    pub table_name: &'static str,
    pub fields: &'static [FilterFieldDef],
}

impl EntitySchema {
    /// Find a field definition by key
    pub fn field(&self, key: &str) -> Option<&'static FilterFieldDef> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Definition of a single filterable field (static version)
#[derive(Debug, Clone)]
pub struct FilterFieldDef {
    /// Filter key as used on the wire (e.g. "status.statusName")
    pub key: &'static str,
    /// Human-readable field name
    pub label: &'static str,
    pub value_type: ValueType,
    /// Choices for enum fields
    pub enum_choices: &'static [&'static str],
    /// Actual database column name
    pub db_column: &'static str,
}

impl FilterFieldDef {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        value_type: ValueType,
        db_column: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            value_type,
            enum_choices: &[],
            db_column,
        }
    }

    pub const fn enumeration(
        key: &'static str,
        label: &'static str,
        enum_choices: &'static [&'static str],
        db_column: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            value_type: ValueType::Enum,
            enum_choices,
            db_column,
        }
    }
}

impl From<&FilterFieldDef> for FieldDescriptor {
    fn from(def: &FilterFieldDef) -> Self {
        FieldDescriptor {
            key: def.key.to_string(),
            label: def.label.to_string(),
            value_type: def.value_type,
            enum_choices: def.enum_choices.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// All schemas served by the registry
pub const ALL_SCHEMAS: &[&EntitySchema] = &[
    &TASK_SCHEMA,
    &PROJECT_SCHEMA,
    &CONTACT_SCHEMA,
    &DEAL_SCHEMA,
    &ACTIVITY_SCHEMA,
    &LEAD_SCHEMA,
];
