/// Place-search provider abstraction
///
/// This module keeps the external place-search service behind a trait so the
/// geo search adapter can be exercised against mocks and the HTTP client can be
/// swapped for another provider speaking the same Nearby Search shape.
use crate::{
    error::AppResult,
    models::{NearbyQuery, PlacePhoto, PlaceResult},
};

pub mod google_places;

pub use google_places::GooglePlacesClient;

/// Trait for place-search providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PlaceProvider: Send + Sync {
    /// Search for places around a point
    ///
    /// A query that matches nothing yields an empty list. Any other provider
    /// status, a non-success HTTP code or a transport failure is an error.
    async fn nearby_search(&self, query: &NearbyQuery) -> AppResult<Vec<PlaceResult>>;

    /// Download the image behind a photo reference
    async fn fetch_photo(&self, reference: &str, max_width: u32) -> AppResult<PlacePhoto>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
