use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::SpotCandidate;

/// Candidate pool of one category, kept in rotation order
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPool {
    pub category_id: String,
    pub candidates: Vec<SpotCandidate>,
}

impl CategoryPool {
    pub fn new(category_id: impl Into<String>, candidates: Vec<SpotCandidate>) -> Self {
        Self {
            category_id: category_id.into(),
            candidates,
        }
    }
}

/// Picks up to `max_results` spots spread evenly across category pools
///
/// Categories take turns in pool order. Each turn draws one random candidate
/// from that category and removes it from the pool; the draw is kept only if
/// no selected spot shares its exact coordinates. Excluded ids never enter a
/// pool. The selection is shuffled before it is returned.
pub fn allocate<R: Rng>(
    pools: Vec<CategoryPool>,
    max_results: usize,
    exclude_ids: &HashSet<String>,
    rng: &mut R,
) -> Vec<SpotCandidate> {
    let mut active: Vec<CategoryPool> = pools
        .into_iter()
        .map(|mut pool| {
            pool.candidates.retain(|c| !exclude_ids.contains(&c.id));
            pool
        })
        .filter(|pool| !pool.candidates.is_empty())
        .collect();

    let mut selected: Vec<SpotCandidate> = Vec::with_capacity(max_results);
    let mut occupied: HashSet<(u64, u64)> = HashSet::new();
    let mut rounds = 0usize;

    while selected.len() < max_results && !active.is_empty() {
        rounds += 1;

        for pool in active.iter_mut() {
            if selected.len() >= max_results {
                break;
            }

            let index = rng.random_range(0..pool.candidates.len());
            let drawn = pool.candidates.swap_remove(index);

            if occupied.insert(drawn.location.identity()) {
                selected.push(drawn);
            } else {
                tracing::trace!(spot = %drawn.id, category = %pool.category_id, "Skipping spot at occupied coordinates");
            }
        }

        active.retain(|pool| !pool.candidates.is_empty());
    }

    selected.shuffle(rng);

    tracing::debug!(
        selected = selected.len(),
        max_results,
        rounds,
        "Fair allocation finished"
    );

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, SpotPhoto};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn candidate(id: &str, category: &str, lat: f64, lng: f64) -> SpotCandidate {
        SpotCandidate {
            id: id.to_string(),
            name: id.to_string(),
            location: Coordinate::new(lat, lng),
            category_id: category.to_string(),
            photo: SpotPhoto::Placeholder("/placeholder.svg?height=400&width=400"),
        }
    }

    /// `count` candidates for a category, each at distinct coordinates
    fn pool(category: &str, count: usize, lat_base: f64) -> CategoryPool {
        let candidates = (0..count)
            .map(|i| {
                candidate(
                    &format!("{}-{}", category, i),
                    category,
                    lat_base + i as f64 * 0.0001,
                    139.767,
                )
            })
            .collect();
        CategoryPool::new(category, candidates)
    }

    fn count_by_category(spots: &[SpotCandidate]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for spot in spots {
            *counts.entry(spot.category_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_balanced_across_two_categories() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pools = vec![pool("cafe", 5, 35.681), pool("restaurant", 5, 35.682)];

            let selected = allocate(pools, 4, &HashSet::new(), &mut rng);
            let counts = count_by_category(&selected);

            assert_eq!(selected.len(), 4);
            assert_eq!(counts.get("cafe"), Some(&2));
            assert_eq!(counts.get("restaurant"), Some(&2));
        }
    }

    #[test]
    fn test_small_category_contributes_what_it_has() {
        let mut rng = StdRng::seed_from_u64(7);
        let pools = vec![pool("cafe", 1, 35.681), pool("restaurant", 6, 35.682)];

        let selected = allocate(pools, 4, &HashSet::new(), &mut rng);
        let counts = count_by_category(&selected);

        assert_eq!(selected.len(), 4);
        assert_eq!(counts.get("cafe"), Some(&1));
        assert_eq!(counts.get("restaurant"), Some(&3));
    }

    #[test]
    fn test_returns_everything_when_max_exceeds_supply() {
        let mut rng = StdRng::seed_from_u64(1);
        let pools = vec![pool("cafe", 2, 35.681), pool("restaurant", 1, 35.682)];

        let selected = allocate(pools, 10, &HashSet::new(), &mut rng);
        assert_eq!(selected.len(), 3);

        let ids: HashSet<String> = selected.into_iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_max_results_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let pools = vec![pool("cafe", 5, 35.681)];
        assert!(allocate(pools, 0, &HashSet::new(), &mut rng).is_empty());
    }

    #[test]
    fn test_no_pools() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(allocate(Vec::new(), 4, &HashSet::new(), &mut rng).is_empty());
        assert!(allocate(
            vec![CategoryPool::new("cafe", Vec::new())],
            4,
            &HashSet::new(),
            &mut rng
        )
        .is_empty());
    }

    #[test]
    fn test_excluded_ids_never_selected() {
        let mut rng = StdRng::seed_from_u64(3);
        let pools = vec![pool("cafe", 3, 35.681), pool("restaurant", 3, 35.682)];
        let exclude: HashSet<String> = ["cafe-0", "cafe-1", "restaurant-2"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let selected = allocate(pools, 10, &exclude, &mut rng);

        assert_eq!(selected.len(), 3);
        assert!(selected.iter().all(|c| !exclude.contains(&c.id)));
    }

    #[test]
    fn test_all_excluded_yields_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let pools = vec![pool("cafe", 2, 35.681), pool("restaurant", 2, 35.682)];
        let exclude: HashSet<String> = ["cafe-0", "cafe-1", "restaurant-0", "restaurant-1"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert!(allocate(pools, 4, &exclude, &mut rng).is_empty());
    }

    #[test]
    fn test_same_coordinates_across_categories_selected_once() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pools = vec![
                CategoryPool::new(
                    "cafe",
                    vec![candidate("place-1", "cafe", 35.6812, 139.7671)],
                ),
                CategoryPool::new(
                    "tourist_attraction",
                    vec![candidate("place-1", "tourist_attraction", 35.6812, 139.7671)],
                ),
            ];

            let selected = allocate(pools, 4, &HashSet::new(), &mut rng);
            assert_eq!(selected.len(), 1);
        }
    }

    #[test]
    fn test_no_shared_coordinates_in_output() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut cafe = pool("cafe", 4, 35.681);
        let mut restaurant = pool("restaurant", 4, 35.681);
        cafe.candidates.push(candidate("dup-a", "cafe", 35.7, 139.7));
        restaurant.candidates.push(candidate("dup-b", "restaurant", 35.7, 139.7));

        let selected = allocate(vec![cafe, restaurant], 10, &HashSet::new(), &mut rng);

        let coords: HashSet<(u64, u64)> = selected.iter().map(|c| c.location.identity()).collect();
        assert_eq!(coords.len(), selected.len());
    }

    #[test]
    fn test_same_seed_same_selection() {
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let pools = vec![
                pool("cafe", 3, 35.681),
                pool("restaurant", 5, 35.682),
                pool("public_bath", 1, 35.683),
            ];
            allocate(pools, 6, &HashSet::new(), &mut rng)
                .into_iter()
                .map(|c| c.id)
                .collect::<Vec<_>>()
        };

        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_exhaustion_order_does_not_depend_on_seed() {
        // public_bath runs dry after round one, cafe after round three
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pools = vec![
                pool("cafe", 3, 35.681),
                pool("restaurant", 5, 35.682),
                pool("public_bath", 1, 35.683),
            ];

            let counts = count_by_category(&allocate(pools, 7, &HashSet::new(), &mut rng));
            assert_eq!(counts.get("public_bath"), Some(&1));
            assert_eq!(counts.get("cafe"), Some(&3));
            assert_eq!(counts.get("restaurant"), Some(&3));
        }
    }
}
