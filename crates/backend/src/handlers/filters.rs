use axum::{
    extract::{Path, RawQuery},
    http::StatusCode,
    Json,
};
use contracts::shared::filter::{
    FilterEngine, FilterFieldInfo, FilterSet, FilterSqlResponse, GetFilterFieldsResponse,
    ListFilterEntitiesResponse, SerializeFilterResponse,
};

use crate::shared::filters::{get_registry, RegisteredEntity, WhereBuilder};

fn entity_or_404(entity: &str) -> Result<&'static RegisteredEntity, StatusCode> {
    get_registry().entity(entity).ok_or_else(|| {
        tracing::warn!("Filters: unknown entity: {}", entity);
        StatusCode::NOT_FOUND
    })
}

/// GET /api/filters/entities
pub async fn list_entities() -> Json<ListFilterEntitiesResponse> {
    Json(ListFilterEntitiesResponse {
        entities: get_registry().list_all(),
    })
}

/// GET /api/filters/:entity/fields
/// Fields of an entity with the operators offered for each
pub async fn get_fields(
    Path(entity): Path<String>,
) -> Result<Json<GetFilterFieldsResponse>, StatusCode> {
    let registered = entity_or_404(&entity)?;

    Ok(Json(GetFilterFieldsResponse {
        entity,
        fields: registered
            .fields
            .fields()
            .iter()
            .map(FilterFieldInfo::from)
            .collect(),
    }))
}

/// GET /api/filters/:entity/parse?status=eq%3AActive&_logic=or
/// Hydrate a filter set from URL query parameters
pub async fn parse_query(
    Path(entity): Path<String>,
    RawQuery(raw): RawQuery,
) -> Result<Json<FilterSet>, StatusCode> {
    let registered = entity_or_404(&entity)?;
    let engine = FilterEngine::new(&registered.fields);

    let filter_set = engine.from_query_string(raw.as_deref().unwrap_or(""));
    tracing::debug!("Filters: parsed {} condition(s) for {}", filter_set.len(), entity);

    Ok(Json(filter_set))
}

/// POST /api/filters/:entity/serialize
pub async fn serialize(
    Path(entity): Path<String>,
    Json(filter_set): Json<FilterSet>,
) -> Result<Json<SerializeFilterResponse>, StatusCode> {
    let registered = entity_or_404(&entity)?;
    let engine = FilterEngine::new(&registered.fields);

    let query = engine.serialize(&filter_set);
    let query_string = contracts::shared::filter::to_query_string(&query, filter_set.combinator);

    Ok(Json(SerializeFilterResponse {
        query,
        query_string,
    }))
}

/// POST /api/filters/:entity/sql
/// Translate a filter set into a parameterized WHERE clause
pub async fn to_sql(
    Path(entity): Path<String>,
    Json(filter_set): Json<FilterSet>,
) -> Result<Json<FilterSqlResponse>, StatusCode> {
    let registered = entity_or_404(&entity)?;

    match WhereBuilder::new(registered).build(&filter_set) {
        Ok(clause) => {
            if clause.is_empty() {
                tracing::debug!("Filters: no applicable conditions for {}", entity);
            }
            Ok(Json(FilterSqlResponse {
                sql: clause.sql,
                params: clause.params.iter().map(|p| p.to_display()).collect(),
            }))
        }
        Err(e) => {
            tracing::error!("Filters: failed to build SQL for {}: {}", entity, e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}
