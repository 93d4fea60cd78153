use chrono::Utc;

use super::dto::WeatherReading;

/// Deterministic synthetic reading derived from the city name. Serves as the
/// offline mode and as the fallback when the live lookup fails: the same city
/// always yields the same numeric fields.
pub fn synthesize(city: &str) -> WeatherReading {
    let city_hash: u64 = city.chars().map(|c| c as u64).sum();

    let temperature = (20 + city_hash % 15) as f64;
    let humidity = (30 + city_hash % 60) as f64;
    let pressure = (1000 + city_hash % 30) as f64;
    let wind_speed = (city_hash % 15) as f64;

    let description = if temperature > 25.0 {
        "Sunny"
    } else if temperature > 20.0 {
        "Partly Cloudy"
    } else if temperature > 15.0 {
        "Cloudy"
    } else if temperature > 10.0 {
        "Rainy"
    } else {
        "Stormy"
    };

    WeatherReading {
        city: city.to_string(),
        temperature,
        humidity,
        pressure,
        wind_speed,
        description: description.to_string(),
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_city() {
        let a = synthesize("Kyiv");
        let b = synthesize("Kyiv");
        assert_eq!(a.temperature, b.temperature);
        assert_eq!(a.humidity, b.humidity);
        assert_eq!(a.pressure, b.pressure);
        assert_eq!(a.wind_speed, b.wind_speed);
        assert_eq!(a.description, b.description);
    }

    #[test]
    fn empty_city_hashes_to_zero() {
        let reading = synthesize("");
        assert_eq!(reading.temperature, 20.0);
        assert_eq!(reading.humidity, 30.0);
        assert_eq!(reading.pressure, 1000.0);
        assert_eq!(reading.wind_speed, 0.0);
        // 20 is not > 20, so the > 15 branch wins
        assert_eq!(reading.description, "Cloudy");
        assert_eq!(reading.city, "");
    }

    #[test]
    fn hash_sums_code_points() {
        // "AB" = 65 + 66 = 131
        let reading = synthesize("AB");
        assert_eq!(reading.temperature, (20 + 131 % 15) as f64);
        assert_eq!(reading.humidity, (30 + 131 % 60) as f64);
        assert_eq!(reading.pressure, (1000 + 131 % 30) as f64);
        assert_eq!(reading.wind_speed, (131 % 15) as f64);
    }

    #[test]
    fn non_ascii_city_uses_full_code_point() {
        // 'é' is U+00E9 = 233, not its two UTF-8 bytes
        let reading = synthesize("é");
        assert_eq!(reading.wind_speed, (233 % 15) as f64);
    }

    #[test]
    fn city_echoed_unchanged() {
        let reading = synthesize("  San  Francisco ");
        assert_eq!(reading.city, "  San  Francisco ");
    }

    #[test]
    fn description_tracks_temperature_thresholds() {
        // city_hash % 15 spans 0..=14, so temperature spans 20..=34
        for hash in 0u64..15 {
            let city: String = std::iter::repeat('\u{1}').take(hash as usize).collect();
            let reading = synthesize(&city);
            let expected = if reading.temperature > 25.0 {
                "Sunny"
            } else if reading.temperature > 20.0 {
                "Partly Cloudy"
            } else {
                "Cloudy"
            };
            assert_eq!(reading.description, expected);
        }
    }
}
