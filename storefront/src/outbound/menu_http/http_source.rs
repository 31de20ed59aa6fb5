//! Reqwest-backed menu source adapter.
//!
//! Owns transport details only: URL construction, timeout and HTTP error
//! mapping, and JSON decoding into domain categories.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{CategoryDto, RestaurantDto, into_domain_categories};
use crate::domain::ports::{FetchError, MenuSource};
use crate::domain::{MenuCategory, RestaurantId};

/// Menu source performing GET requests against the menu service.
pub struct MenuHttpSource {
    client: Client,
    base_url: Url,
}

impl MenuHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, resource: &str, restaurant: &RestaurantId) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                FetchError::transport(format!("menu base url {} cannot hold a path", self.base_url))
            })?
            .pop_if_empty()
            .extend([resource, restaurant.as_ref()]);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!(%url, "fetching from menu service");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref())
            .map_err(|error| FetchError::decode(format!("invalid JSON payload: {error}")))
    }
}

#[async_trait]
impl MenuSource for MenuHttpSource {
    async fn restaurant_name(&self, restaurant: &RestaurantId) -> Result<String, FetchError> {
        let url = self.endpoint("restaurants", restaurant)?;
        let restaurant: RestaurantDto = self.get_json(url).await?;
        Ok(restaurant.name)
    }

    async fn menu(&self, restaurant: &RestaurantId) -> Result<Vec<MenuCategory>, FetchError> {
        let url = self.endpoint("menu", restaurant)?;
        let categories: Vec<CategoryDto> = self.get_json(url).await?;
        into_domain_categories(categories).map_err(FetchError::decode)
    }
}

fn map_transport_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::timeout(error.to_string())
    } else {
        FetchError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> FetchError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            FetchError::timeout(format!("status {}", status.as_u16()))
        }
        _ => FetchError::status(status.as_u16(), body_preview(body)),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.
    use super::*;
    use rstest::rstest;

    fn source(base: &str) -> MenuHttpSource {
        let base = Url::parse(base).expect("base url");
        MenuHttpSource::new(base, Duration::from_secs(1)).expect("client builds")
    }

    #[rstest]
    #[case("http://192.168.1.164:5000", "menu", "http://192.168.1.164:5000/menu/7")]
    #[case("http://host/api/", "restaurants", "http://host/api/restaurants/7")]
    #[case("http://host/api", "menu", "http://host/api/menu/7")]
    fn endpoints_append_resource_and_id(
        #[case] base: &str,
        #[case] resource: &str,
        #[case] expected: &str,
    ) {
        let restaurant = RestaurantId::new("7").expect("restaurant id");
        let url = source(base)
            .endpoint(resource, &restaurant)
            .expect("endpoint");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    #[case(StatusCode::GATEWAY_TIMEOUT, true)]
    #[case(StatusCode::REQUEST_TIMEOUT, true)]
    #[case(StatusCode::NOT_FOUND, false)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn maps_statuses(#[case] status: StatusCode, #[case] is_timeout: bool) {
        let error = map_status_error(status, b"{\"error\": \"nope\"}");
        if is_timeout {
            assert!(matches!(error, FetchError::Timeout { .. }));
        } else {
            assert_eq!(
                error,
                FetchError::status(status.as_u16(), "{\"error\": \"nope\"}")
            );
        }
    }

    #[test]
    fn long_bodies_are_truncated_in_previews() {
        let body = "x ".repeat(400);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 123);
    }
}
