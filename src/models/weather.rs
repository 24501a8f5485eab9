use serde::{Deserialize, Serialize};
use crate::utils::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct WeatherReport {
    pub city: String,
    /// Degrees Celsius, rounded to the nearest integer.
    pub temperature: i64,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawWeather {
    pub main: Option<RawWeatherMain>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawWeatherMain {
    pub temp: Option<f64>,
}

impl WeatherReport {
    /// The report echoes the requested city rather than the provider's canonical name.
    pub fn from_raw(city: &str, raw: RawWeather) -> Result<Self, AppError> {
        let temp = raw
            .main
            .and_then(|m| m.temp)
            .filter(|t| t.is_finite())
            .ok_or_else(|| {
                AppError::MalformedUpstream("OpenWeather payload is missing `main.temp`".to_string())
            })?;

        Ok(WeatherReport {
            city: city.to_string(),
            temperature: round_half_up(temp),
        })
    }
}

// Halves go toward +inf (-2.5 -> -2), unlike f64::round which goes away from zero.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(round_half_up(21.5), 22);
        assert_eq!(round_half_up(21.49), 21);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_report_keeps_requested_city() {
        let raw: RawWeather = serde_json::from_value(serde_json::json!({
            "name": "Tokyo",
            "main": { "temp": 17.6, "humidity": 40 },
            "weather": [{ "main": "Clouds" }]
        }))
        .unwrap();

        let report = WeatherReport::from_raw("tokyo", raw).unwrap();
        assert_eq!(report, WeatherReport { city: "tokyo".to_string(), temperature: 18 });
    }

    #[test]
    fn test_missing_temperature_is_malformed() {
        let raw: RawWeather = serde_json::from_value(serde_json::json!({ "cod": 200 })).unwrap();
        assert!(matches!(
            WeatherReport::from_raw("Oslo", raw),
            Err(AppError::MalformedUpstream(_))
        ));
    }
}
