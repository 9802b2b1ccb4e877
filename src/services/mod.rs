pub mod allocation;
pub mod categories;
pub mod curation;
pub mod distance;
pub mod geo_search;
pub mod providers;
pub mod stations;

pub use curation::Curator;
pub use geo_search::{GeoSearch, SearchSettings};
pub use stations::{StationCatalog, StationDirectory};
