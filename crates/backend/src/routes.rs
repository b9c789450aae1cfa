use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // FILTER ENGINE
        // ========================================
        .route("/api/filters/entities", get(handlers::filters::list_entities))
        .route("/api/filters/:entity/fields", get(handlers::filters::get_fields))
        .route("/api/filters/:entity/parse", get(handlers::filters::parse_query))
        .route(
            "/api/filters/:entity/serialize",
            post(handlers::filters::serialize),
        )
        .route(
            "/api/filters/:entity/sql",
            post(handlers::filters::to_sql),
        )
        // ========================================
        // SAVED FILTERS
        // ========================================
        .route(
            "/api/saved-filters",
            get(handlers::saved_filters::list).post(handlers::saved_filters::create),
        )
        .route(
            "/api/saved-filters/:id",
            get(handlers::saved_filters::get_by_id)
                .put(handlers::saved_filters::update)
                .delete(handlers::saved_filters::delete),
        )
}
