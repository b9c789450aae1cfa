//! Filter field registry
//!
//! Central registry of the entities that can be filtered, each with its
//! static schema and the validated field registry handed to the engine.

use std::collections::HashMap;

use contracts::shared::filter::{FieldDescriptor, FieldRegistry, FilterEntityInfo};

use super::schemas::{self, EntitySchema};

/// Registered entity: static schema plus the engine-facing field registry
pub struct RegisteredEntity {
    pub schema: &'static EntitySchema,
    pub fields: FieldRegistry,
}

/// Registry of filterable entities
pub struct EntityRegistry {
    entities: HashMap<String, RegisteredEntity>,
}

impl EntityRegistry {
    /// Create a new registry with all available schemas
    pub fn new() -> Self {
        let mut registry = Self {
            entities: HashMap::new(),
        };

        for schema in schemas::ALL_SCHEMAS.iter().copied() {
            registry.register(schema);
        }

        registry
    }

    /// Register a schema; invalid schemas are logged and skipped
    fn register(&mut self, schema: &'static EntitySchema) {
        let fields: Vec<FieldDescriptor> = schema.fields.iter().map(Into::into).collect();

        match FieldRegistry::new(schema.id, fields) {
            Ok(fields) => {
                self.entities
                    .insert(schema.id.to_string(), RegisteredEntity { schema, fields });
            }
            Err(e) => {
                tracing::error!("Filter schema '{}' rejected: {}", schema.id, e);
            }
        }
    }

    /// Get entity by id
    pub fn entity(&self, id: &str) -> Option<&RegisteredEntity> {
        self.entities.get(id)
    }

    /// Check if entity exists
    pub fn has_entity(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// List all entities, sorted by id
    pub fn list_all(&self) -> Vec<FilterEntityInfo> {
        let mut result: Vec<FilterEntityInfo> = self
            .entities
            .values()
            .map(|entry| FilterEntityInfo {
                id: entry.schema.id.to_string(),
                name: entry.schema.name.to_string(),
                field_count: entry.fields.len(),
            })
            .collect();

        result.sort_by(|a, b| a.id.cmp(&b.id));
        result
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global entity registry instance
static REGISTRY: std::sync::OnceLock<EntityRegistry> = std::sync::OnceLock::new();

/// Get global entity registry
pub fn get_registry() -> &'static EntityRegistry {
    REGISTRY.get_or_init(EntityRegistry::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_schemas_register() {
        let registry = EntityRegistry::new();
        let ids: Vec<String> = registry.list_all().into_iter().map(|e| e.id).collect();

        assert_eq!(ids, vec!["activity", "contact", "deal", "lead", "project", "task"]);
    }

    #[test]
    fn test_task_registry_fields() {
        let registry = EntityRegistry::new();
        let task = registry.entity("task").unwrap();

        let priority = task.fields.get("priority").unwrap();
        assert_eq!(priority.enum_choices, vec!["Low", "Medium", "High", "Critical"]);
        assert!(task.fields.contains("status.statusName"));
        assert_eq!(task.schema.field("dueDate").unwrap().db_column, "due_date");
    }

    #[test]
    fn test_unknown_entity() {
        let registry = EntityRegistry::new();
        assert!(registry.entity("invoice").is_none());
        assert!(!registry.has_entity("invoice"));
    }
}
