use std::sync::Arc;

use crate::{
    cache::QueryCache,
    config::Config,
    error::AppResult,
    models::RequestLimits,
    services::{
        categories::default_category_ids,
        providers::{GooglePlacesClient, PlaceProvider},
        Curator, GeoSearch, SearchSettings, StationCatalog, StationDirectory,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub curator: Curator,
    pub stations: Arc<dyn StationDirectory>,
    /// Also used directly by the photo proxy
    pub provider: Arc<dyn PlaceProvider>,
    pub limits: RequestLimits,
}

impl AppState {
    /// Wires the curation pipeline around an existing provider and station source
    pub fn new(
        provider: Arc<dyn PlaceProvider>,
        stations: Arc<dyn StationDirectory>,
        config: &Config,
    ) -> Self {
        let cache = QueryCache::new(config.cache_ttl(), config.cache_capacity);
        if !cache.is_enabled() {
            tracing::info!("Provider response cache disabled");
        }

        let settings = SearchSettings {
            language: config.search_language.clone(),
            region: config.search_region.clone(),
            per_category_limit: config.per_category_limit,
        };

        let curator = Curator::new(GeoSearch::new(Arc::clone(&provider), cache, settings));

        let limits = RequestLimits {
            default_radius_meters: config.default_radius_meters,
            max_radius_meters: config.max_radius_meters,
            default_max_results: config.default_max_results,
            max_results_limit: config.max_results_limit,
            default_categories: default_category_ids(),
        };

        Self {
            curator,
            stations,
            provider,
            limits,
        }
    }

    /// Builds the production state: HTTP provider client plus the station file
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let provider = GooglePlacesClient::new(
            config.places_api_key.clone(),
            config.places_api_url.clone(),
            config.http_timeout(),
        )?;
        let stations = StationCatalog::load(&config.stations_path)?;

        Ok(Self::new(Arc::new(provider), Arc::new(stations), config))
    }
}
