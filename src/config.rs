use serde::Deserialize;

/// Base URLs and timeout for the outbound weather lookups. Both services are
/// keyless; the bases are overridable so tests can point them at a local stub.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub geocoding_base: String,
    pub forecast_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub upstream: UpstreamConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:weather_dashboard.db".into());
        let upstream = UpstreamConfig {
            geocoding_base: std::env::var("GEOCODING_BASE_URL")
                .unwrap_or_else(|_| "https://geocoding-api.open-meteo.com".into()),
            forecast_base: std::env::var("FORECAST_BASE_URL")
                .unwrap_or_else(|_| "https://api.open-meteo.com".into()),
            timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(10),
        };
        Ok(Self {
            database_url,
            upstream,
        })
    }
}
