// HTTP access to the departure and weather endpoints
//
// One GET per call. No retries, no caching and no timeout: the caller decides
// how long it is willing to wait.

use crate::ndb_models::{BusApiResponse, DataCategory, NDBError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct NDBApi {
    client: Client,
}

impl NDBApi {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ndb/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        NDBApi { client }
    }

    pub async fn fetch_bus_data(&self, url: &str) -> Result<BusApiResponse> {
        self.fetch_document(url, DataCategory::Bus).await
    }

    /// The weather payload is passed through untyped.
    pub async fn fetch_weather_data(&self, url: &str) -> Result<serde_json::Value> {
        self.fetch_document(url, DataCategory::Weather).await
    }

    async fn fetch_document<T: DeserializeOwned>(&self, url: &str, category: DataCategory) -> Result<T> {
        log::debug!("Fetching {} data from {}", category, url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            log::warn!("{} endpoint answered {}", category, response.status());
            return Err(NDBError::FetchFailed(category));
        }

        let body = response.text().await?;
        let document = serde_json::from_str(&body)?;

        log::debug!("Fetched {} data ({} bytes)", category, body.len());
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ndb_test_fixtures::SAMPLE_BUS_JSON;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_with(route: &str, response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn fetches_bus_snapshot() {
        let server = server_with(
            "/departures",
            ResponseTemplate::new(200).set_body_string(SAMPLE_BUS_JSON),
        )
        .await;

        let api = NDBApi::new().unwrap();
        let data = api
            .fetch_bus_data(&format!("{}/departures", server.uri()))
            .await
            .unwrap();

        assert_eq!(data.stops[0].name, "Centralstationen");
        assert_eq!(data.departures.len(), 3);
    }

    #[tokio::test]
    async fn fetches_weather_untyped() {
        let server = server_with(
            "/forecast",
            ResponseTemplate::new(200)
                .set_body_string(r#"{"current": {"temperature_2m": 12.5}, "anything": [1, 2]}"#),
        )
        .await;

        let api = NDBApi::new().unwrap();
        let weather = api
            .fetch_weather_data(&format!("{}/forecast", server.uri()))
            .await
            .unwrap();

        assert_eq!(weather["current"]["temperature_2m"], 12.5);
        assert_eq!(weather["anything"][1], 2);
    }

    #[tokio::test]
    async fn non_success_status_is_a_labelled_failure() {
        let server = server_with(
            "/departures",
            ResponseTemplate::new(503).set_body_string("upstream exploded"),
        )
        .await;

        let api = NDBApi::new().unwrap();
        let err = api
            .fetch_bus_data(&format!("{}/departures", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, NDBError::FetchFailed(DataCategory::Bus)));
        assert_eq!(err.to_string(), "Failed to fetch bus data");
    }

    #[tokio::test]
    async fn weather_failure_names_weather() {
        let server = server_with("/forecast", ResponseTemplate::new(404)).await;

        let api = NDBApi::new().unwrap();
        let err = api
            .fetch_weather_data(&format!("{}/forecast", server.uri()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to fetch weather data");
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let server = server_with(
            "/departures",
            ResponseTemplate::new(200).set_body_string("{ not json"),
        )
        .await;

        let api = NDBApi::new().unwrap();
        let err = api
            .fetch_bus_data(&format!("{}/departures", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, NDBError::Parse(_)));
    }

    #[tokio::test]
    async fn wrong_shape_is_a_parse_error() {
        let server = server_with(
            "/departures",
            ResponseTemplate::new(200).set_body_string(r#"{"departures": "none"}"#),
        )
        .await;

        let api = NDBApi::new().unwrap();
        let err = api
            .fetch_bus_data(&format!("{}/departures", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, NDBError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let api = NDBApi::new().unwrap();
        let err = api
            .fetch_bus_data("http://127.0.0.1:9/departures")
            .await
            .unwrap_err();

        assert!(matches!(err, NDBError::Network(_)));
    }
}
