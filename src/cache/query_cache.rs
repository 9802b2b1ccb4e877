use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, OnceCell};

use crate::models::Coordinate;

/// Grid resolution used to snap anchors, in cells per degree (about 100 m)
const GRID_CELLS_PER_DEGREE: f64 = 1_000.0;

/// Anchor snapped to a coarse grid so nearby anchors share cache entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    lat: i64,
    lng: i64,
}

impl From<Coordinate> for GridCell {
    fn from(point: Coordinate) -> Self {
        Self {
            lat: (point.lat * GRID_CELLS_PER_DEGREE).round() as i64,
            lng: (point.lng * GRID_CELLS_PER_DEGREE).round() as i64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Nearby {
        cell: GridCell,
        radius_meters: u32,
        category_id: String,
        keywords: String,
    },
}

impl CacheKey {
    pub fn nearby(anchor: Coordinate, radius_meters: u32, category_id: &str, keywords: &str) -> Self {
        CacheKey::Nearby {
            cell: GridCell::from(anchor),
            radius_meters,
            category_id: category_id.to_string(),
            keywords: keywords.to_string(),
        }
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Nearby {
                cell,
                radius_meters,
                category_id,
                keywords,
            } => write!(
                f,
                "nearby:{}:{}:{}:{}:{}",
                cell.lat, cell.lng, radius_meters, category_id, keywords
            ),
        }
    }
}

struct Slot<V> {
    created_at: Instant,
    cell: Arc<OnceCell<V>>,
}

/// Process-local cache of provider responses
///
/// Each key owns a write-once cell. Concurrent lookups of the same key wait on
/// the single in-flight population instead of issuing their own. A failed or
/// abandoned population leaves the cell empty so the next caller fills it.
/// Expired slots are replaced, never mutated, so a late completion can only
/// land in a slot that is no longer reachable.
#[derive(Clone)]
pub struct QueryCache<V> {
    slots: Arc<Mutex<HashMap<CacheKey, Slot<V>>>>,
    ttl: Duration,
    capacity: usize,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            capacity,
        }
    }

    /// A cache that never stores anything
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, 0)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero() && self.capacity > 0
    }

    /// Returns the cached value for `key`, running `populate` on a miss
    ///
    /// Errors from `populate` are handed back to the caller and not stored.
    pub async fn get_or_try_populate<F, Fut, E>(&self, key: CacheKey, populate: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if !self.is_enabled() {
            return populate().await;
        }

        let cell = self.slot_for(&key).await;
        if cell.initialized() {
            tracing::debug!(key = %key, "Cache hit");
        }

        let value = cell.get_or_try_init(populate).await?;
        Ok(value.clone())
    }

    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    async fn slot_for(&self, key: &CacheKey) -> Arc<OnceCell<V>> {
        let mut slots = self.slots.lock().await;
        let now = Instant::now();

        if let Some(slot) = slots.get(key) {
            if now.duration_since(slot.created_at) < self.ttl {
                return slot.cell.clone();
            }
        }

        if !slots.contains_key(key) && slots.len() >= self.capacity {
            self.evict(&mut slots, now);
        }

        let cell = Arc::new(OnceCell::new());
        slots.insert(
            key.clone(),
            Slot {
                created_at: now,
                cell: cell.clone(),
            },
        );
        cell
    }

    /// Drops expired slots, then the oldest one if the map is still full
    fn evict(&self, slots: &mut HashMap<CacheKey, Slot<V>>, now: Instant) {
        let ttl = self.ttl;
        slots.retain(|_, slot| now.duration_since(slot.created_at) < ttl);

        if slots.len() >= self.capacity {
            let oldest = slots
                .iter()
                .min_by_key(|(_, slot)| slot.created_at)
                .map(|(key, _)| key.clone());
            if let Some(key) = oldest {
                tracing::debug!(key = %key, "Evicting oldest cache entry");
                slots.remove(&key);
            }
        }
    }
}
