use crate::models::{Coordinate, SpotCandidate};

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres (haversine)
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Keeps the candidates lying within `radius_meters` of `anchor`
///
/// The provider treats its radius as a ranking hint, so its results can fall
/// outside the requested circle.
pub fn filter_within_radius(
    anchor: Coordinate,
    radius_meters: u32,
    candidates: Vec<SpotCandidate>,
) -> Vec<SpotCandidate> {
    let radius_km = f64::from(radius_meters) / 1000.0;
    let before = candidates.len();

    let kept: Vec<SpotCandidate> = candidates
        .into_iter()
        .filter(|c| haversine_km(anchor, c.location) <= radius_km)
        .collect();

    if kept.len() < before {
        tracing::debug!(
            dropped = before - kept.len(),
            kept = kept.len(),
            radius_meters,
            "Discarded candidates outside radius"
        );
    }

    kept
}
