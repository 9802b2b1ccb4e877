use std::sync::Arc;

use crate::{
    cache::{CacheKey, QueryCache},
    cached,
    error::AppError,
    models::{
        CategoryDescriptor, Coordinate, NearbyQuery, PlaceResult, RankBy, SearchType,
        SpotCandidate, SpotPhoto,
    },
    services::{categories::placeholder_for, providers::PlaceProvider},
};

/// Immutable per-query snapshot shared between cache readers
pub type SpotSnapshot = Arc<Vec<SpotCandidate>>;

/// Provider hints and volume caps applied to every search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub language: String,
    pub region: String,
    /// Candidates kept per category fetch
    pub per_category_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            language: "ja".to_string(),
            region: "jp".to_string(),
            per_category_limit: 5,
        }
    }
}

/// Searches one category around an anchor and normalizes the results
///
/// A failing category never fails the caller: provider errors are logged and
/// the category comes back empty.
#[derive(Clone)]
pub struct GeoSearch {
    provider: Arc<dyn PlaceProvider>,
    cache: QueryCache<SpotSnapshot>,
    settings: SearchSettings,
}

impl GeoSearch {
    pub fn new(
        provider: Arc<dyn PlaceProvider>,
        cache: QueryCache<SpotSnapshot>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            provider,
            cache,
            settings,
        }
    }

    /// Candidates for `descriptor` around `anchor`, at most `per_category_limit`
    pub async fn search(
        &self,
        anchor: Coordinate,
        radius_meters: u32,
        descriptor: &CategoryDescriptor,
    ) -> Vec<SpotCandidate> {
        let key = CacheKey::nearby(anchor, radius_meters, &descriptor.id, &descriptor.keywords);
        let query = &self.build_query(anchor, radius_meters, descriptor);

        let result = cached!(self.cache, key, async move {
            let places = self.provider.nearby_search(query).await?;
            Ok::<_, AppError>(Arc::new(self.normalize(places, descriptor)))
        });

        match result {
            Ok(snapshot) => {
                tracing::debug!(
                    category = %descriptor.id,
                    candidates = snapshot.len(),
                    provider = self.provider.name(),
                    "Category search completed"
                );
                snapshot.as_ref().clone()
            }
            Err(e) => {
                tracing::warn!(
                    category = %descriptor.id,
                    error = %e,
                    provider = self.provider.name(),
                    "Category search failed, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Provider query for a category
    ///
    /// Built-in categories filter by place type. Custom ones rely on keyword
    /// matching ranked by prominence.
    pub fn build_query(
        &self,
        anchor: Coordinate,
        radius_meters: u32,
        descriptor: &CategoryDescriptor,
    ) -> NearbyQuery {
        let (place_type, rank_by) = match descriptor.search_type() {
            Some(search_type) => (search_type.primary().map(str::to_string), None),
            None => (None, Some(RankBy::Prominence)),
        };

        if let Some(SearchType::Multiple(types)) = descriptor.search_type() {
            tracing::trace!(category = %descriptor.id, types = ?types, "Sending only the first place type");
        }

        NearbyQuery {
            location: anchor,
            radius_meters,
            keyword: descriptor.keywords.clone(),
            place_type,
            rank_by,
            language: self.settings.language.clone(),
            region: self.settings.region.clone(),
        }
    }

    fn normalize(&self, places: Vec<PlaceResult>, descriptor: &CategoryDescriptor) -> Vec<SpotCandidate> {
        let placeholder = placeholder_for(descriptor);

        places
            .into_iter()
            .take(self.settings.per_category_limit)
            .map(|place| {
                let photo = match place.first_photo_reference() {
                    Some(reference) => SpotPhoto::Reference(reference.to_string()),
                    None => SpotPhoto::Placeholder(placeholder),
                };

                SpotCandidate {
                    id: place.place_id,
                    name: place.name,
                    location: place.geometry.location,
                    category_id: descriptor.id.clone(),
                    photo,
                }
            })
            .collect()
    }
}
