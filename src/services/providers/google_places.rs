/// Google Places provider
///
/// Speaks the legacy Places web service:
/// 1. Nearby Search: /nearbysearch/json → places around a location
/// 2. Photo: /photo → image bytes for a photo reference
///
/// Failures are reported as errors here; deciding that a failed category is
/// simply empty is the geo search adapter's job.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{
        places::{STATUS_OK, STATUS_ZERO_RESULTS},
        NearbyQuery, NearbySearchResponse, PlacePhoto, PlaceResult,
    },
    services::providers::PlaceProvider,
};

const DEFAULT_PHOTO_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Clone)]
pub struct GooglePlacesClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl GooglePlacesClient {
    /// Creates a client with a per-request timeout
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Query string for a Nearby Search call
    fn nearby_params(&self, query: &NearbyQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            (
                "location",
                format!("{},{}", query.location.lat, query.location.lng),
            ),
            ("radius", query.radius_meters.to_string()),
            ("keyword", query.keyword.clone()),
            ("language", query.language.clone()),
            ("region", query.region.clone()),
        ];

        if let Some(place_type) = &query.place_type {
            params.push(("type", place_type.clone()));
        }

        if let Some(rank_by) = query.rank_by {
            params.push(("rankby", rank_by.as_str().to_string()));
        }

        params.push(("key", self.api_key.clone()));
        params
    }

    /// Maps a decoded response to results, treating ZERO_RESULTS as empty
    fn interpret(response: NearbySearchResponse) -> AppResult<Vec<PlaceResult>> {
        match response.status.as_str() {
            STATUS_OK => Ok(response.results),
            STATUS_ZERO_RESULTS => Ok(Vec::new()),
            status => Err(AppError::ExternalApi(format!(
                "Places API returned status {}: {}",
                status,
                response.error_message.unwrap_or_default()
            ))),
        }
    }
}

#[async_trait::async_trait]
impl PlaceProvider for GooglePlacesClient {
    async fn nearby_search(&self, query: &NearbyQuery) -> AppResult<Vec<PlaceResult>> {
        let url = format!("{}/nearbysearch/json", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&self.nearby_params(query))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Places API returned HTTP {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let decoded: NearbySearchResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                tracing::error!(
                    error = %e,
                    response = %response_text,
                    "Failed to deserialize Places response"
                );
                AppError::ExternalApi(format!("Failed to parse Places response: {}", e))
            })?;

        let status = decoded.status.clone();
        let results = Self::interpret(decoded)?;

        tracing::debug!(
            keyword = %query.keyword,
            place_type = ?query.place_type,
            status = %status,
            results = results.len(),
            provider = "google_places",
            "Nearby search completed"
        );

        Ok(results)
    }

    async fn fetch_photo(&self, reference: &str, max_width: u32) -> AppResult<PlacePhoto> {
        if reference.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Photo reference cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/photo", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("maxwidth", max_width.to_string()),
                ("photo_reference", reference.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(status = %status, "Photo request failed");
            return Err(AppError::ExternalApi(format!(
                "Places photo request returned HTTP {}",
                status
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_PHOTO_CONTENT_TYPE)
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        Ok(PlacePhoto {
            content_type,
            bytes,
        })
    }

    fn name(&self) -> &'static str {
        "google_places"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, RankBy};

    fn create_test_client() -> GooglePlacesClient {
        GooglePlacesClient::new(
            "test_key".to_string(),
            "http://test.local/".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn query(place_type: Option<&str>, rank_by: Option<RankBy>) -> NearbyQuery {
        NearbyQuery {
            location: Coordinate::new(35.681, 139.767),
            radius_meters: 1000,
            keyword: "カフェ".to_string(),
            place_type: place_type.map(str::to_string),
            rank_by,
            language: "ja".to_string(),
            region: "jp".to_string(),
        }
    }

    fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(create_test_client().api_url, "http://test.local");
    }

    #[test]
    fn test_builtin_params_include_type() {
        let client = create_test_client();
        let params = client.nearby_params(&query(Some("cafe"), None));

        assert_eq!(param(&params, "location"), Some("35.681,139.767"));
        assert_eq!(param(&params, "radius"), Some("1000"));
        assert_eq!(param(&params, "type"), Some("cafe"));
        assert_eq!(param(&params, "language"), Some("ja"));
        assert_eq!(param(&params, "region"), Some("jp"));
        assert_eq!(param(&params, "key"), Some("test_key"));
        assert_eq!(param(&params, "rankby"), None);
    }

    #[test]
    fn test_custom_params_rank_by_prominence() {
        let client = create_test_client();
        let params = client.nearby_params(&query(None, Some(RankBy::Prominence)));

        assert_eq!(param(&params, "type"), None);
        assert_eq!(param(&params, "rankby"), Some("prominence"));
    }

    #[test]
    fn test_interpret_zero_results() {
        let response = NearbySearchResponse {
            status: "ZERO_RESULTS".to_string(),
            results: vec![],
            error_message: None,
        };
        assert!(GooglePlacesClient::interpret(response).unwrap().is_empty());
    }

    #[test]
    fn test_interpret_denied() {
        let response = NearbySearchResponse {
            status: "REQUEST_DENIED".to_string(),
            results: vec![],
            error_message: Some("The provided API key is invalid.".to_string()),
        };
        let err = GooglePlacesClient::interpret(response).unwrap_err();
        assert!(err.to_string().contains("REQUEST_DENIED"));
    }
}
