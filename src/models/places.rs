// ============================================================================
// Place-search provider wire types (Nearby Search JSON)
// ============================================================================

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Provider status meaning "the query was fine, nothing matched"
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
pub const STATUS_OK: &str = "OK";

/// Raw Nearby Search response
#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub photos: Option<Vec<PlacePhotoRef>>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl PlaceResult {
    pub fn first_photo_reference(&self) -> Option<&str> {
        self.photos
            .as_ref()
            .and_then(|photos| photos.first())
            .map(|photo| photo.photo_reference.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Geometry {
    pub location: Coordinate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacePhotoRef {
    pub photo_reference: String,
}

/// Result ordering requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    Prominence,
}

impl RankBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankBy::Prominence => "prominence",
        }
    }
}

/// One provider Nearby Search call
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub location: Coordinate,
    pub radius_meters: u32,
    pub keyword: String,
    pub place_type: Option<String>,
    pub rank_by: Option<RankBy>,
    pub language: String,
    pub region: String,
}

/// Photo bytes fetched from the provider
#[derive(Debug, Clone)]
pub struct PlacePhoto {
    pub content_type: String,
    pub bytes: Vec<u8>,
}
