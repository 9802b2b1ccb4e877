use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A transit station used as a search anchor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub lines: Vec<String>,
    pub lat: f64,
    pub lng: f64,
}

impl Station {
    pub fn anchor(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}
