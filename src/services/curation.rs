use futures::future::join_all;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::{CategoryDescriptor, SelectionRequest, SpotCandidate},
    services::{
        allocation::{allocate, CategoryPool},
        categories::CategoryResolver,
        distance::filter_within_radius,
        geo_search::GeoSearch,
    },
};

/// Composes resolution, search, filtering and allocation for one request
///
/// Holds no per-request state; the only thing shared across calls is the
/// response cache inside the geo search adapter.
#[derive(Clone)]
pub struct Curator {
    search: GeoSearch,
}

impl Curator {
    pub fn new(search: GeoSearch) -> Self {
        Self { search }
    }

    /// Selects a fair, duplicate-free set of spots around the request anchor
    ///
    /// Unknown categories and failed category searches only shrink the
    /// candidate pools. A request nothing matches yields an empty list.
    pub async fn curate<R: Rng + Send>(
        &self,
        request: &SelectionRequest,
        rng: &mut R,
    ) -> AppResult<Vec<SpotCandidate>> {
        validate(request)?;

        let descriptors = CategoryResolver::new(&request.custom_categories)
            .resolve_all(&request.categories);

        if request.max_results == 0 || descriptors.is_empty() {
            tracing::debug!(
                max_results = request.max_results,
                categories = descriptors.len(),
                "Nothing to curate"
            );
            return Ok(Vec::new());
        }

        let pools = self.gather_pools(request, &descriptors).await;
        let available: usize = pools.iter().map(|p| p.candidates.len()).sum();

        let selected = allocate(pools, request.max_results, &request.exclude_ids, rng);

        tracing::info!(
            categories = descriptors.len(),
            candidates = available,
            selected = selected.len(),
            max_results = request.max_results,
            "Curation completed"
        );

        Ok(selected)
    }

    /// Picks a single spot from one randomly chosen category
    ///
    /// Returns `None` when that category has nothing left after filtering and
    /// exclusion; other categories are not tried.
    pub async fn pick_one<R: Rng + Send>(
        &self,
        request: &SelectionRequest,
        rng: &mut R,
    ) -> AppResult<Option<SpotCandidate>> {
        validate(request)?;

        let descriptors = CategoryResolver::new(&request.custom_categories)
            .resolve_all(&request.categories);

        let Some(descriptor) = descriptors.choose(rng) else {
            return Ok(None);
        };

        tracing::debug!(category = %descriptor.id, "Picking one spot");

        let pools = self
            .gather_pools(request, std::slice::from_ref(descriptor))
            .await;

        Ok(allocate(pools, 1, &request.exclude_ids, rng).into_iter().next())
    }

    /// Searches every category concurrently and filters each result set
    async fn gather_pools(
        &self,
        request: &SelectionRequest,
        descriptors: &[CategoryDescriptor],
    ) -> Vec<CategoryPool> {
        let searches = descriptors.iter().map(|descriptor| async move {
            let candidates = self
                .search
                .search(request.anchor, request.radius_meters, descriptor)
                .await;
            let within = filter_within_radius(request.anchor, request.radius_meters, candidates);
            CategoryPool::new(descriptor.id.clone(), within)
        });

        join_all(searches).await
    }
}

fn validate(request: &SelectionRequest) -> AppResult<()> {
    if request.radius_meters == 0 {
        return Err(AppError::InvalidInput(
            "radius_meters must be positive".to_string(),
        ));
    }
    if !request.anchor.lat.is_finite()
        || !request.anchor.lng.is_finite()
        || request.anchor.lat.abs() > 90.0
        || request.anchor.lng.abs() > 180.0
    {
        return Err(AppError::InvalidInput(format!(
            "anchor ({}, {}) is not a valid coordinate",
            request.anchor.lat, request.anchor.lng
        )));
    }
    Ok(())
}
