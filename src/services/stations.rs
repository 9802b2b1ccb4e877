use std::collections::HashMap;
use std::path::Path;

use rand::seq::IndexedRandom;

use crate::{
    error::{AppError, AppResult},
    models::Station,
};

/// Source of station records used as search anchors
#[async_trait::async_trait]
pub trait StationDirectory: Send + Sync {
    /// Looks up a station by id, failing with `NotFound`
    async fn get_station(&self, id: &str) -> AppResult<Station>;

    /// Picks a station uniformly at random
    async fn random_station(&self, rng: &mut (dyn rand::RngCore + Send)) -> AppResult<Station>;
}

/// In-memory station catalog loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: Vec<Station>,
    index: HashMap<String, usize>,
}

impl StationCatalog {
    pub fn new(stations: Vec<Station>) -> Self {
        let mut index = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            if index.insert(station.id.clone(), i).is_some() {
                tracing::warn!(station_id = %station.id, "Duplicate station id, keeping the last entry");
            }
        }
        Self { stations, index }
    }

    /// Parses a JSON array of stations
    pub fn from_json(json: &str) -> AppResult<Self> {
        let stations: Vec<Station> = serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("Invalid station catalog: {}", e)))?;
        Ok(Self::new(stations))
    }

    /// Reads and parses the station catalog file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Failed to read station catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        let catalog = Self::from_json(&json)?;

        tracing::info!(
            path = %path.display(),
            stations = catalog.len(),
            "Loaded station catalog"
        );

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[async_trait::async_trait]
impl StationDirectory for StationCatalog {
    async fn get_station(&self, id: &str) -> AppResult<Station> {
        self.index
            .get(id)
            .map(|&i| self.stations[i].clone())
            .ok_or_else(|| AppError::NotFound(format!("Station {} not found", id)))
    }

    async fn random_station(&self, rng: &mut (dyn rand::RngCore + Send)) -> AppResult<Station> {
        self.stations
            .choose(rng)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Station catalog is empty".to_string()))
    }
}
