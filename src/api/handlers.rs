use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{
        CategorySummary, RandomStationResponse, SingleSpotResponse, SpotResponse, SpotsRequest,
        SpotsResponse, Station,
    },
    services::categories::builtin_categories,
};

use super::AppState;

/// Width requested from the provider for proxied photos
const PHOTO_MAX_WIDTH: u32 = 400;

const PHOTO_CACHE_CONTROL: &str = "public, max-age=31536000";

#[derive(Debug, Deserialize)]
pub struct PhotoQuery {
    reference: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Built-in categories a caller can ask for
pub async fn list_categories() -> Json<Vec<CategorySummary>> {
    Json(builtin_categories().iter().map(CategorySummary::from).collect())
}

pub async fn get_station(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
) -> AppResult<Json<Station>> {
    let station = state.stations.get_station(&station_id).await?;
    Ok(Json(station))
}

/// Curates a set of spots around a station
pub async fn station_spots(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    Json(request): Json<SpotsRequest>,
) -> AppResult<Json<SpotsResponse>> {
    let station = state.stations.get_station(&station_id).await?;
    let selection = request.into_selection(station.anchor(), &state.limits)?;

    let mut rng = StdRng::from_os_rng();
    let spots = state.curator.curate(&selection, &mut rng).await?;

    tracing::info!(
        station_id = %station.id,
        selected = spots.len(),
        "Served station spots"
    );

    Ok(Json(SpotsResponse {
        spots: spots.iter().map(SpotResponse::from).collect(),
    }))
}

/// Picks one spot around a station, used to swap out a single card
pub async fn station_spot(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    Json(request): Json<SpotsRequest>,
) -> AppResult<Json<SingleSpotResponse>> {
    let station = state.stations.get_station(&station_id).await?;
    let selection = request.into_selection(station.anchor(), &state.limits)?;

    let mut rng = StdRng::from_os_rng();
    let spot = state.curator.pick_one(&selection, &mut rng).await?;

    tracing::info!(
        station_id = %station.id,
        found = spot.is_some(),
        "Served single spot"
    );

    Ok(Json(SingleSpotResponse {
        spot: spot.as_ref().map(SpotResponse::from),
    }))
}

/// Picks a random station and curates spots around it
pub async fn random_station_spots(
    State(state): State<AppState>,
    Json(request): Json<SpotsRequest>,
) -> AppResult<Json<RandomStationResponse>> {
    let mut rng = StdRng::from_os_rng();
    let station = state.stations.random_station(&mut rng).await?;
    let selection = request.into_selection(station.anchor(), &state.limits)?;

    let spots = state.curator.curate(&selection, &mut rng).await?;

    tracing::info!(
        station_id = %station.id,
        selected = spots.len(),
        "Served random station"
    );

    Ok(Json(RandomStationResponse {
        station,
        spots: spots.iter().map(SpotResponse::from).collect(),
    }))
}

/// Streams a provider photo so the API key never reaches the client
pub async fn place_photo(
    State(state): State<AppState>,
    Query(params): Query<PhotoQuery>,
) -> AppResult<impl IntoResponse> {
    let reference = params
        .reference
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("reference is required".to_string()))?;

    let photo = state
        .provider
        .fetch_photo(&reference, PHOTO_MAX_WIDTH)
        .await?;

    tracing::debug!(bytes = photo.bytes.len(), "Proxied place photo");

    Ok((
        [
            (header::CONTENT_TYPE, photo.content_type),
            (header::CACHE_CONTROL, PHOTO_CACHE_CONTROL.to_string()),
        ],
        photo.bytes,
    ))
}
