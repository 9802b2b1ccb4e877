use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(handlers::list_categories))
        // Stations
        .route("/stations/random", post(handlers::random_station_spots))
        .route("/stations/:id", get(handlers::get_station))
        .route("/stations/:id/spots", post(handlers::station_spots))
        .route("/stations/:id/spot", post(handlers::station_spot))
        // Photos
        .route("/place-photo", get(handlers::place_photo))
}
