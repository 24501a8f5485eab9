use actix_web::{web, HttpResponse};
use serde::Deserialize;
use crate::{
    api::ErrorResponse,
    models::WeatherReport,
    services::weather_service,
    state::AppState,
};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeatherQuery {
    /// City name, passed to OpenWeather as-is
    pub city: Option<String>,
}

/// GET /api/weather?city=Tokyo
#[utoipa::path(
    get,
    path = "/api/weather",
    tag = "Weather",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Rounded temperature in Celsius", body = WeatherReport),
        (status = 400, description = "City parameter missing or query string unreadable", body = ErrorResponse),
        (status = 500, description = "Missing API key or OpenWeather failure", body = ErrorResponse)
    )
)]
pub async fn get_weather(
    query: web::Query<WeatherQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let city = query.city.as_deref().unwrap_or_default();
    log::info!("🌤️  GET /api/weather?city={}", city);

    match weather_service::get_weather(&state, city).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            log::error!("❌ Weather API Error: {}", e);
            e.to_response("Failed to fetch weather data")
        }
    }
}
