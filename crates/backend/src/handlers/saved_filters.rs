use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::shared::filter::{
    DeleteFilterResponse, ListSavedFiltersResponse, LoadedFilter, SaveFilterRequest,
    SaveFilterResponse, UpdateFilterRequest,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::shared::data::db::get_connection;
use crate::shared::filters::service::{self, ValidationError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub entity: Option<String>,
}

/// 404 for an unknown entity, 400 for other rejected input, 500 for storage failures
fn error_status(action: &str, e: &anyhow::Error) -> StatusCode {
    match e.downcast_ref::<ValidationError>() {
        Some(ValidationError::UnknownEntity(_)) => {
            tracing::warn!("Saved filters: {} rejected: {}", action, e);
            StatusCode::NOT_FOUND
        }
        Some(ValidationError::EmptyName) => {
            tracing::warn!("Saved filters: {} rejected: {}", action, e);
            StatusCode::BAD_REQUEST
        }
        None => {
            tracing::error!("Saved filters: failed to {}: {}", action, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET /api/saved-filters?entity=task
pub async fn list(
    Query(params): Query<ListParams>,
) -> Result<Json<ListSavedFiltersResponse>, StatusCode> {
    list_in(get_connection(), params).await
}

/// GET /api/saved-filters/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<LoadedFilter>, StatusCode> {
    get_in(get_connection(), &id).await
}

/// POST /api/saved-filters
pub async fn create(
    Json(request): Json<SaveFilterRequest>,
) -> Result<Json<SaveFilterResponse>, StatusCode> {
    create_in(get_connection(), request).await
}

/// PUT /api/saved-filters/:id
pub async fn update(
    Path(id): Path<String>,
    Json(request): Json<UpdateFilterRequest>,
) -> Result<Json<SaveFilterResponse>, StatusCode> {
    update_in(get_connection(), &id, request).await
}

/// DELETE /api/saved-filters/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<DeleteFilterResponse>, StatusCode> {
    delete_in(get_connection(), &id).await
}

async fn list_in(
    db: &DatabaseConnection,
    params: ListParams,
) -> Result<Json<ListSavedFiltersResponse>, StatusCode> {
    match service::list(db, params.entity.as_deref()).await {
        Ok(filters) => {
            tracing::info!("Saved filters: returning {} filter(s)", filters.len());
            Ok(Json(ListSavedFiltersResponse { filters }))
        }
        Err(e) => Err(error_status("list", &e)),
    }
}

async fn get_in(db: &DatabaseConnection, id: &str) -> Result<Json<LoadedFilter>, StatusCode> {
    match service::load(db, id).await {
        Ok(Some(loaded)) => Ok(Json(loaded)),
        Ok(None) => {
            tracing::warn!("Saved filters: not found: {}", id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => Err(error_status("load", &e)),
    }
}

async fn create_in(
    db: &DatabaseConnection,
    request: SaveFilterRequest,
) -> Result<Json<SaveFilterResponse>, StatusCode> {
    tracing::info!("Saved filters: saving '{}' for {}", request.name, request.entity);

    match service::save(db, request).await {
        Ok(saved) => Ok(Json(SaveFilterResponse {
            id: saved.id,
            message: "Filter saved successfully".to_string(),
        })),
        Err(e) => Err(error_status("save", &e)),
    }
}

async fn update_in(
    db: &DatabaseConnection,
    id: &str,
    request: UpdateFilterRequest,
) -> Result<Json<SaveFilterResponse>, StatusCode> {
    tracing::info!("Saved filters: updating {}", id);

    match service::update(db, id, request).await {
        Ok(Some(saved)) => Ok(Json(SaveFilterResponse {
            id: saved.id,
            message: "Filter updated successfully".to_string(),
        })),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(error_status("update", &e)),
    }
}

async fn delete_in(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Json<DeleteFilterResponse>, StatusCode> {
    match service::delete(db, id).await {
        Ok(true) => {
            tracing::info!("Saved filters: deleted {}", id);
            Ok(Json(DeleteFilterResponse { success: true }))
        }
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(error_status("delete", &e)),
    }
}
