use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub mod category;
pub mod places;
pub mod spot;
pub mod station;

pub use category::{CategoryDescriptor, CategoryKind, CategorySummary, CustomCategory, SearchType};
pub use places::{NearbyQuery, NearbySearchResponse, PlacePhoto, PlaceResult, RankBy};
pub use spot::{Coordinate, SpotCandidate, SpotPhoto, SpotResponse};
pub use station::Station;

/// Fully validated input of one curation call
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRequest {
    pub anchor: Coordinate,
    /// Requested category ids, in rotation order
    pub categories: Vec<String>,
    /// User-defined categories the ids may refer to
    pub custom_categories: Vec<CustomCategory>,
    pub radius_meters: u32,
    pub max_results: usize,
    /// Spot ids already shown to the user
    pub exclude_ids: HashSet<String>,
}

/// Bounds and defaults applied to incoming spot requests
#[derive(Debug, Clone, PartialEq)]
pub struct RequestLimits {
    pub default_radius_meters: u32,
    pub max_radius_meters: u32,
    pub default_max_results: usize,
    pub max_results_limit: usize,
    /// Categories used when the caller names none
    pub default_categories: Vec<String>,
}

/// Body of the spot endpoints
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SpotsRequest {
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub custom_categories: Vec<CustomCategory>,
    #[serde(default)]
    pub exclude_ids: Vec<String>,
    #[serde(default)]
    pub radius_meters: Option<i64>,
    #[serde(default)]
    pub max_results: Option<i64>,
}

impl SpotsRequest {
    /// Validates the wire request and binds it to an anchor
    ///
    /// Malformed numbers fail here, before any provider work starts. Custom
    /// categories with a blank id or label are dropped.
    pub fn into_selection(
        self,
        anchor: Coordinate,
        limits: &RequestLimits,
    ) -> AppResult<SelectionRequest> {
        let radius_meters = match self.radius_meters {
            None => limits.default_radius_meters,
            Some(r) if r <= 0 => {
                return Err(AppError::InvalidInput(format!(
                    "radius_meters must be positive, got {}",
                    r
                )))
            }
            Some(r) if r > i64::from(limits.max_radius_meters) => {
                return Err(AppError::InvalidInput(format!(
                    "radius_meters must not exceed {}, got {}",
                    limits.max_radius_meters, r
                )))
            }
            Some(r) => r as u32,
        };

        let max_results = match self.max_results {
            None => limits.default_max_results,
            Some(m) if m < 0 => {
                return Err(AppError::InvalidInput(format!(
                    "max_results must not be negative, got {}",
                    m
                )))
            }
            Some(m) if m as u64 > limits.max_results_limit as u64 => {
                return Err(AppError::InvalidInput(format!(
                    "max_results must not exceed {}, got {}",
                    limits.max_results_limit, m
                )))
            }
            Some(m) => m as usize,
        };

        let custom_categories: Vec<CustomCategory> = self
            .custom_categories
            .into_iter()
            .filter_map(|custom| {
                let id = custom.id.clone();
                let validated = custom.validated();
                if validated.is_none() {
                    tracing::warn!(category = %id, "Dropping malformed custom category");
                }
                validated
            })
            .collect();

        Ok(SelectionRequest {
            anchor,
            categories: self
                .categories
                .unwrap_or_else(|| limits.default_categories.clone()),
            custom_categories,
            radius_meters,
            max_results,
            exclude_ids: self.exclude_ids.into_iter().collect(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpotsResponse {
    pub spots: Vec<SpotResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SingleSpotResponse {
    pub spot: Option<SpotResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RandomStationResponse {
    pub station: Station,
    pub spots: Vec<SpotResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> RequestLimits {
        RequestLimits {
            default_radius_meters: 1000,
            max_radius_meters: 50_000,
            default_max_results: 4,
            max_results_limit: 20,
            default_categories: vec!["cafe".to_string(), "restaurant".to_string()],
        }
    }

    fn anchor() -> Coordinate {
        Coordinate::new(35.681, 139.767)
    }

    #[test]
    fn test_defaults_applied() {
        let selection = SpotsRequest::default()
            .into_selection(anchor(), &limits())
            .unwrap();

        assert_eq!(selection.radius_meters, 1000);
        assert_eq!(selection.max_results, 4);
        assert_eq!(selection.categories, vec!["cafe", "restaurant"]);
        assert!(selection.exclude_ids.is_empty());
    }

    #[test]
    fn test_explicit_empty_categories_kept_empty() {
        let request = SpotsRequest {
            categories: Some(vec![]),
            ..Default::default()
        };
        let selection = request.into_selection(anchor(), &limits()).unwrap();
        assert!(selection.categories.is_empty());
    }

    #[test]
    fn test_negative_radius_rejected() {
        let request = SpotsRequest {
            radius_meters: Some(-5),
            ..Default::default()
        };
        let err = request.into_selection(anchor(), &limits()).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_radius_above_ceiling_rejected() {
        let request = SpotsRequest {
            radius_meters: Some(60_000),
            ..Default::default()
        };
        assert!(request.into_selection(anchor(), &limits()).is_err());
    }

    #[test]
    fn test_max_results_bounds() {
        let negative = SpotsRequest {
            max_results: Some(-1),
            ..Default::default()
        };
        assert!(negative.into_selection(anchor(), &limits()).is_err());

        let too_many = SpotsRequest {
            max_results: Some(21),
            ..Default::default()
        };
        assert!(too_many.into_selection(anchor(), &limits()).is_err());

        let zero = SpotsRequest {
            max_results: Some(0),
            ..Default::default()
        };
        assert_eq!(zero.into_selection(anchor(), &limits()).unwrap().max_results, 0);
    }

    #[test]
    fn test_malformed_custom_categories_dropped() {
        let request = SpotsRequest {
            categories: Some(vec!["custom-1".to_string(), "custom-2".to_string()]),
            custom_categories: vec![
                CustomCategory {
                    id: "custom-1".to_string(),
                    label: "古着屋".to_string(),
                },
                CustomCategory {
                    id: "custom-2".to_string(),
                    label: "".to_string(),
                },
            ],
            ..Default::default()
        };

        let selection = request.into_selection(anchor(), &limits()).unwrap();
        assert_eq!(selection.custom_categories.len(), 1);
        assert_eq!(selection.custom_categories[0].id, "custom-1");
    }

    #[test]
    fn test_spots_request_deserializes_partial_body() {
        let request: SpotsRequest =
            serde_json::from_str(r#"{ "exclude_ids": ["a"], "max_results": 2 }"#).unwrap();
        assert!(request.categories.is_none());
        assert_eq!(request.exclude_ids, vec!["a"]);
        assert_eq!(request.max_results, Some(2));
    }
}
