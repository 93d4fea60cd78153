use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{dto::WeatherReading, mock};
use crate::config::UpstreamConfig;

/// Outcome of a lookup. The public API collapses both variants into a
/// successful reading; the distinction exists so callers and tests can tell
/// the live path from the fallback path.
#[derive(Debug, Clone)]
pub enum WeatherFetch {
    Live(WeatherReading),
    Fallback(WeatherReading),
}

impl WeatherFetch {
    pub fn into_reading(self) -> WeatherReading {
        match self {
            WeatherFetch::Live(r) | WeatherFetch::Fallback(r) => r,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, WeatherFetch::Fallback(_))
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> WeatherFetch;
}

/// Keyless geocoding + current-conditions client. Any failure along the way
/// is swallowed and replaced with a synthetic reading.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_base: String,
    forecast_base: String,
}

impl OpenMeteoProvider {
    pub fn new(cfg: &UpstreamConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            geocoding_base: cfg.geocoding_base.trim_end_matches('/').to_string(),
            forecast_base: cfg.forecast_base.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_live(&self, city: &str) -> Result<WeatherReading> {
        let url = format!("{}/v1/search", self.geocoding_base);
        let res = self
            .http
            .get(&url)
            .query(&[("name", city), ("count", "1")])
            .send()
            .await
            .context("send geocoding request")?;

        let status = res.status();
        let body = res.text().await.context("read geocoding response body")?;
        if !status.is_success() {
            return Err(anyhow!(
                "geocoding request failed with status {status}: {}",
                truncate_body(&body),
            ));
        }
        debug!(%city, body = %truncate_body(&body), "geocoding response");

        let parsed: GeocodingResponse =
            serde_json::from_str(&body).context("parse geocoding JSON")?;
        let location = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no geocoding match for '{city}'"))?;

        let url = format!("{}/v1/forecast", self.forecast_base);
        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,pressure_msl,wind_speed_10m,weather_code"
                        .to_string(),
                ),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .context("send forecast request")?;

        let status = res.status();
        let body = res.text().await.context("read forecast response body")?;
        if !status.is_success() {
            return Err(anyhow!(
                "forecast request failed with status {status}: {}",
                truncate_body(&body),
            ));
        }

        let parsed: ForecastResponse = serde_json::from_str(&body).context("parse forecast JSON")?;
        let current = parsed.current;

        Ok(WeatherReading {
            // the geocoded display name, which may differ from the input spelling
            city: location.name,
            temperature: current.temperature_2m,
            humidity: current.relative_humidity_2m,
            pressure: current.pressure_msl,
            wind_speed: current.wind_speed_10m,
            description: describe_weather_code(current.weather_code).to_string(),
            timestamp: Utc::now(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn current(&self, city: &str) -> WeatherFetch {
        match self.fetch_live(city).await {
            Ok(reading) => WeatherFetch::Live(reading),
            Err(e) => {
                warn!(%city, error = %e, "live weather lookup failed, using synthetic reading");
                WeatherFetch::Fallback(mock::synthesize(city))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeoLocation>>,
}

#[derive(Debug, Deserialize)]
struct GeoLocation {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    pressure_msl: f64,
    wind_speed_10m: f64,
    weather_code: u16,
}

/// WMO weather interpretation codes (WW) to human-readable descriptions.
pub fn describe_weather_code(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

fn truncate_body(body: &str) -> &str {
    match body.char_indices().nth(300) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(base: &str) -> OpenMeteoProvider {
        OpenMeteoProvider::new(&UpstreamConfig {
            geocoding_base: base.to_string(),
            forecast_base: base.to_string(),
            timeout_secs: 2,
        })
        .expect("build provider")
    }

    #[test]
    fn weather_code_table() {
        assert_eq!(describe_weather_code(0), "Clear sky");
        assert_eq!(describe_weather_code(95), "Thunderstorm");
        assert_eq!(describe_weather_code(1000), "Unknown");
    }

    #[tokio::test]
    async fn live_path_uses_geocoded_name_and_code_table() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "london"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"name": "London", "latitude": 51.5, "longitude": -0.12}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current": {
                    "temperature_2m": 17.3,
                    "relative_humidity_2m": 81.0,
                    "pressure_msl": 1012.4,
                    "wind_speed_10m": 5.1,
                    "weather_code": 95
                }
            })))
            .mount(&server)
            .await;

        let fetch = provider_for(&server.uri()).current("london").await;
        assert!(!fetch.is_fallback());
        let reading = fetch.into_reading();
        assert_eq!(reading.city, "London");
        assert_eq!(reading.temperature, 17.3);
        assert_eq!(reading.description, "Thunderstorm");
    }

    #[tokio::test]
    async fn no_geocoding_match_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let fetch = provider_for(&server.uri()).current("Atlantis").await;
        assert!(fetch.is_fallback());
        let reading = fetch.into_reading();
        let expected = mock::synthesize("Atlantis");
        assert_eq!(reading.city, "Atlantis");
        assert_eq!(reading.temperature, expected.temperature);
        assert_eq!(reading.description, expected.description);
    }

    #[tokio::test]
    async fn upstream_error_status_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetch = provider_for(&server.uri()).current("Oslo").await;
        assert!(fetch.is_fallback());
    }

    #[tokio::test]
    async fn unreachable_upstream_falls_back() {
        // discard port, nothing listens there
        let fetch = provider_for("http://127.0.0.1:9").current("Lima").await;
        assert!(fetch.is_fallback());
        assert_eq!(
            fetch.into_reading().wind_speed,
            mock::synthesize("Lima").wind_speed
        );
    }

    #[tokio::test]
    async fn malformed_forecast_json_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"name": "Paris", "latitude": 48.85, "longitude": 2.35}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let fetch = provider_for(&server.uri()).current("Paris").await;
        assert!(fetch.is_fallback());
    }
}
