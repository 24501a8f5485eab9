use actix_web::{web, HttpResponse};
use crate::{
    api::ErrorResponse,
    models::PresenceProfile,
    services::presence_service,
    state::AppState,
};

/// GET /api/discord/user
#[utoipa::path(
    get,
    path = "/api/discord/user",
    tag = "Presence",
    responses(
        (status = 200, description = "Discord profile used by the presence card", body = PresenceProfile),
        (status = 500, description = "Missing bot credentials or Discord failure", body = ErrorResponse)
    )
)]
pub async fn get_presence(state: web::Data<AppState>) -> HttpResponse {
    log::info!("💬 GET /api/discord/user");

    match presence_service::get_presence(&state).await {
        Ok(profile) => HttpResponse::Ok().json(&*profile),
        Err(e) => {
            log::error!("❌ Discord API Error: {}", e);
            e.to_response("Failed to fetch Discord data")
        }
    }
}
