use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::state::AppState;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    pub integrations: Integrations,
}

/// Which upstreams have their credentials in place. `false` means the
/// matching endpoint will answer with a configuration error.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct Integrations {
    pub github: bool,
    pub discord: bool,
    pub weather: bool,
    pub contact: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up; integrations show which credentials are set", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let config = &state.config;

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        integrations: Integrations {
            github: config.github_token.is_some(),
            discord: config.discord_bot_token.is_some() && config.discord_id.is_some(),
            weather: config.openweather_api_key.is_some(),
            contact: config.discord_webhook_url.is_some(),
        },
    })
}
