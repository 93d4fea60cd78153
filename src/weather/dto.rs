use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A current-conditions snapshot for a city, live or synthetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// Day-count window for history and chart queries.
#[derive(Debug, Deserialize)]
pub struct HistoryWindow {
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    7
}
