pub mod entity_registry;
pub mod repository;
pub mod schemas;
pub mod service;
pub mod where_builder;

pub use entity_registry::{get_registry, RegisteredEntity};
pub use where_builder::WhereBuilder;
