pub mod health;
pub mod metrics;
pub mod projects;
pub mod presence;
pub mod weather;
pub mod contact;
pub mod skills;
pub mod swagger;

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, HttpRequest, HttpResponse,
};
use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(
            web::scope("/api")
                .route("/github/repos", web::get().to(projects::get_repositories))
                .route("/github/repos/top", web::get().to(projects::get_top_projects))
                .route("/discord/user", web::get().to(presence::get_presence))
                .route("/weather", web::get().to(weather::get_weather))
                .route("/contact", web::post().to(contact::submit_contact))
                .route("/skills", web::get().to(skills::get_skills))
        );
}

/// Keeps malformed JSON bodies inside the `{"error": ...}` envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️  Rejected request body: {}", err);
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: "Invalid request body".to_string(),
    });
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Same envelope for query strings that do not deserialize (e.g. a repeated `city`).
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️  Rejected query string: {}", err);
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: "Invalid query string".to_string(),
    });
    actix_web::error::InternalError::from_response(err, response).into()
}
