use crate::{
    config::AppConfig,
    models::{RawWeather, WeatherReport},
    services::upstream,
    state::AppState,
    utils::AppError,
};

/// Current temperature for `city`, cached per exact city string.
///
/// Keys are not normalised (no trimming, no case folding): "Tokyo" and "tokyo"
/// are separate entries and each costs one upstream call.
pub async fn get_weather(state: &AppState, city: &str) -> Result<WeatherReport, AppError> {
    if city.trim().is_empty() {
        return Err(AppError::Validation("City parameter is required".to_string()));
    }

    let api_key = AppConfig::require(&state.config.openweather_api_key, "OPENWEATHER_API_KEY")?;

    state
        .weather
        .get_or_fetch(city, move || async move {
            fetch_weather(&state.http, &state.config.openweather_base_url, api_key, city).await
        })
        .await
}

pub async fn fetch_weather(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    city: &str,
) -> Result<WeatherReport, AppError> {
    log::info!("🌤️  Fetching weather for {}", city);

    let response = client
        .get(base_url)
        .query(&[("q", city), ("units", "metric"), ("appid", api_key)])
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| {
            let e = e.without_url();
            log::error!("❌ Weather request for {} failed: {}", city, e);
            AppError::from(e)
        })?;

    let raw: RawWeather = upstream::read_json("OpenWeather", city, response).await?;
    let report = WeatherReport::from_raw(city, raw)?;

    log::info!("✅ Weather for {}: {}°C", report.city, report.temperature);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::utils::ManualClock;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_city(server: &MockServer, city: &str, temp: f64, times: u64) {
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", city))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "owm_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": city,
                "main": { "temp": temp, "feels_like": temp - 1.0 }
            })))
            .expect(times)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_weather_is_cached_per_city() {
        let server = MockServer::start().await;
        mount_city(&server, "Tokyo", 17.5, 1).await;
        mount_city(&server, "tokyo", 17.4, 1).await;

        let state = AppState::with_clock(test_config(&server.uri()), ManualClock::new()).unwrap();

        let first = get_weather(&state, "Tokyo").await.unwrap();
        let again = get_weather(&state, "Tokyo").await.unwrap();
        let lower = get_weather(&state, "tokyo").await.unwrap();

        assert_eq!(first, WeatherReport { city: "Tokyo".to_string(), temperature: 18 });
        assert_eq!(again, first);
        assert_eq!(lower, WeatherReport { city: "tokyo".to_string(), temperature: 17 });
        assert_eq!(state.weather.stats().entries, 2);
    }

    #[tokio::test]
    async fn test_weather_expires_after_window() {
        let server = MockServer::start().await;
        mount_city(&server, "Oslo", -3.2, 2).await;

        let clock = ManualClock::new();
        let state = AppState::with_clock(test_config(&server.uri()), clock.clone()).unwrap();

        get_weather(&state, "Oslo").await.unwrap();
        clock.advance(Duration::from_secs(5 * 60));
        let report = get_weather(&state, "Oslo").await.unwrap();

        assert_eq!(report.temperature, -3);
    }

    #[tokio::test]
    async fn test_blank_city_is_rejected() {
        let state = AppState::with_clock(test_config("http://127.0.0.1:9"), ManualClock::new()).unwrap();

        let err = get_weather(&state, "  ").await.unwrap_err();
        assert_eq!(err, AppError::Validation("City parameter is required".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_city_is_an_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&server)
            .await;

        let state = AppState::with_clock(test_config(&server.uri()), ManualClock::new()).unwrap();

        let err = get_weather(&state, "Atlantis").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream { status: 404, .. }));
        assert!(state.weather.peek("Atlantis").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_upstream_error_omits_api_key() {
        let state = AppState::with_clock(test_config("http://127.0.0.1:9"), ManualClock::new()).unwrap();

        let err = get_weather(&state, "Oslo").await.unwrap_err();

        assert!(matches!(err, AppError::Transport(_)));
        let rendered = err.to_string();
        assert!(!rendered.contains("owm_test"), "{}", rendered);
        assert!(!rendered.contains("appid"), "{}", rendered);
    }
}
