use anyhow::Result;
use chrono::Utc;
use contracts::shared::filter::{
    FilterEngine, FilterSet, LoadedFilter, SaveFilterRequest, SavedFilter, SavedFilterSummary,
    UpdateFilterRequest,
};
use sea_orm::DatabaseConnection;
use thiserror::Error;
use uuid::Uuid;

use super::entity_registry::{get_registry, RegisteredEntity};
use super::repository;

/// Request rejected before reaching storage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unknown filter entity: {0}")]
    UnknownEntity(String),
    #[error("Filter name must not be empty")]
    EmptyName,
}

fn registered(entity: &str) -> Result<&'static RegisteredEntity> {
    get_registry()
        .entity(entity)
        .ok_or_else(|| ValidationError::UnknownEntity(entity.to_string()).into())
}

fn validated_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    Ok(name.to_string())
}

/// Save a new filter; only its applicable conditions are stored
pub async fn save(db: &DatabaseConnection, request: SaveFilterRequest) -> Result<SavedFilter> {
    let entity = registered(&request.entity)?;
    let name = validated_name(&request.name)?;
    let engine = FilterEngine::new(&entity.fields);

    let now = Utc::now().to_rfc3339();
    let saved = SavedFilter {
        id: Uuid::new_v4().to_string(),
        name,
        entity: request.entity,
        query: engine.serialize(&request.filter_set),
        combinator: request.filter_set.combinator,
        created_at: now.clone(),
        updated_at: now,
    };

    repository::insert(db, &saved).await?;
    tracing::info!(
        "Saved filter '{}' ({}) for {} with {} condition(s)",
        saved.name,
        saved.id,
        saved.entity,
        saved.query.len()
    );
    Ok(saved)
}

/// Replace name and conditions of an existing filter
pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    request: UpdateFilterRequest,
) -> Result<Option<SavedFilter>> {
    let Some(mut saved) = repository::find(db, id).await? else {
        return Ok(None);
    };

    let entity = registered(&saved.entity)?;
    let engine = FilterEngine::new(&entity.fields);

    saved.name = validated_name(&request.name)?;
    saved.query = engine.serialize(&request.filter_set);
    saved.combinator = request.filter_set.combinator;
    saved.updated_at = Utc::now().to_rfc3339();

    let updated = repository::update(
        db,
        id,
        &saved.name,
        &saved.query,
        saved.combinator,
        &saved.updated_at,
    )
    .await?;

    Ok(updated.then_some(saved))
}

/// Load a filter and hydrate its conditions against the entity's current fields.
///
/// Entries whose field or operator no longer exists are dropped.
pub async fn load(db: &DatabaseConnection, id: &str) -> Result<Option<LoadedFilter>> {
    let Some(saved) = repository::find(db, id).await? else {
        return Ok(None);
    };

    let mut filter_set = match get_registry().entity(&saved.entity) {
        Some(entity) => FilterEngine::new(&entity.fields).deserialize(&saved.query),
        None => {
            tracing::warn!(
                "Saved filter {} refers to unknown entity '{}'",
                saved.id,
                saved.entity
            );
            FilterSet::new()
        }
    };
    filter_set.set_combinator(saved.combinator);

    if filter_set.len() < saved.query.len() {
        tracing::warn!(
            "Saved filter {}: dropped {} stale condition(s)",
            saved.id,
            saved.query.len() - filter_set.len()
        );
    }

    Ok(Some(LoadedFilter { saved, filter_set }))
}

pub async fn list(db: &DatabaseConnection, entity: Option<&str>) -> Result<Vec<SavedFilterSummary>> {
    repository::list(db, entity).await
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<bool> {
    repository::delete(db, id).await
}
