use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Route of the photo proxy endpoint
pub const PHOTO_PROXY_PATH: &str = "/api/v1/place-photo";

/// A WGS84 point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Bit-exact identity of the stored values, with -0.0 folded into 0.0
    pub fn identity(&self) -> (u64, u64) {
        fn bits(v: f64) -> u64 {
            if v == 0.0 {
                0.0f64.to_bits()
            } else {
                v.to_bits()
            }
        }
        (bits(self.lat), bits(self.lng))
    }
}

/// Image shown for a spot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotPhoto {
    /// Provider photo reference, served through the photo proxy
    Reference(String),
    /// Static asset used when the provider has no photo
    Placeholder(&'static str),
}

impl SpotPhoto {
    pub fn url(&self) -> String {
        match self {
            SpotPhoto::Reference(reference) => format!(
                "{}?reference={}",
                PHOTO_PROXY_PATH,
                utf8_percent_encode(reference, NON_ALPHANUMERIC)
            ),
            SpotPhoto::Placeholder(path) => (*path).to_string(),
        }
    }
}

/// A provider search result attributed to one category
#[derive(Debug, Clone, PartialEq)]
pub struct SpotCandidate {
    /// Provider place id
    pub id: String,
    pub name: String,
    pub location: Coordinate,
    pub category_id: String,
    pub photo: SpotPhoto,
}

/// Spot record returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpotResponse {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub spot_type: String,
    pub photo: String,
}

impl From<&SpotCandidate> for SpotResponse {
    fn from(spot: &SpotCandidate) -> Self {
        Self {
            id: spot.id.clone(),
            name: spot.name.clone(),
            lat: spot.location.lat,
            lng: spot.location.lng,
            spot_type: spot.category_id.clone(),
            photo: spot.photo.url(),
        }
    }
}
