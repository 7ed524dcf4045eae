use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use tracing::{debug, warn};

use crate::{Config, ForecastResponse, LocationQuery, model::Units};

use super::{FetchError, ForecastProvider};

/// Client for the OpenWeatherMap 5-day / 3-hour forecast endpoint.
#[derive(Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    units: Units,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, base_url: String, units: Units) -> Self {
        Self { api_key, base_url, units, http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key().to_owned(), config.base_url.clone(), config.units)
    }
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .finish()
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherClient {
    async fn get_forecast(&self, location: &LocationQuery) -> Result<ForecastResponse, FetchError> {
        let q = location.to_string();
        debug!(url = %self.base_url, location = %q, units = %self.units, "requesting forecast");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", q.as_str()), ("units", self.units.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "forecast request rejected");
            return Err(FetchError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|source| {
            warn!(error = %source, body = %truncate_body(&body), "unexpected forecast payload");
            FetchError::Decode { source, body }
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer, units: Units) -> OpenWeatherClient {
        OpenWeatherClient::new("TEST_KEY".into(), format!("{}/data/2.5/forecast", server.uri()), units)
    }

    fn paris() -> LocationQuery {
        LocationQuery::new("Paris", "FR").unwrap()
    }

    #[tokio::test]
    async fn sends_expected_query_and_decodes_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .and(query_param("q", "Paris,FR"))
            .and(query_param("units", "imperial"))
            .and(query_param("appid", "TEST_KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": "200",
                "city": { "name": "Paris", "country": "FR" },
                "list": [
                    { "dt": 1, "main": { "temp": 1.0 }, "weather": [{ "description": "a" }], "wind": { "speed": 1.0 } },
                    { "dt": 2, "main": { "temp": 2.0 }, "weather": [{ "description": "b" }], "wind": { "speed": 2.0 } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server, Units::Imperial).get_forecast(&paris()).await.unwrap();

        assert_eq!(response.list.len(), 2);
        assert_eq!(response.list[0]["dt"], 1);
        assert_eq!(response.list[1]["dt"], 2);
        assert_eq!(response.city.unwrap().name, "Paris");
    }

    #[tokio::test]
    async fn metric_units_are_forwarded() {
        let server = MockServer::start().await;
        Mock::given(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server, Units::Metric).get_forecast(&paris()).await.unwrap();
        assert!(response.list.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server, Units::Imperial).get_forecast(&paris()).await.unwrap_err();

        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status.as_u16(), 401);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_payload_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server, Units::Imperial).get_forecast(&paris()).await.unwrap_err();

        assert!(matches!(err, FetchError::Decode { .. }));
        assert_eq!(err.body(), Some("<html>oops</html>"));
    }

    #[tokio::test]
    async fn connection_failure_is_a_request_error() {
        // Reserve a port, then release it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OpenWeatherClient::new(
            "TEST_KEY".into(),
            format!("http://{addr}/data/2.5/forecast"),
            Units::Imperial,
        );

        let err = client.get_forecast(&paris()).await.unwrap_err();

        assert!(matches!(err, FetchError::Request(_)));
        assert_eq!(err.body(), None);
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = OpenWeatherClient::new("SECRET".into(), "http://x".into(), Units::Imperial);
        let text = format!("{client:?}");

        assert!(!text.contains("SECRET"));
        assert!(text.contains("<redacted>"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let short = "short body";
        assert_eq!(truncate_body(short), short);

        let long = "é".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }
}
