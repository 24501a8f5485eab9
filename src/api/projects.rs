use actix_web::{web, HttpResponse};
use crate::{
    api::ErrorResponse,
    models::Repository,
    services::github_service,
    state::AppState,
};

const GITHUB_ERROR: &str = "Failed to fetch GitHub data";

/// GET /api/github/repos
/// Lista os repositórios acompanhados (cache de 5 minutos)
#[utoipa::path(
    get,
    path = "/api/github/repos",
    tag = "Projects",
    responses(
        (status = 200, description = "Tracked repositories in configured order", body = [Repository]),
        (status = 500, description = "Missing token or GitHub failure", body = ErrorResponse)
    )
)]
pub async fn get_repositories(state: web::Data<AppState>) -> HttpResponse {
    log::info!("🐙 GET /api/github/repos");

    match github_service::get_repositories(&state).await {
        Ok(repos) => {
            log::info!("✅ Returning {} repositories", repos.len());
            HttpResponse::Ok().json(repos.as_slice())
        }
        Err(e) => {
            log::error!("❌ GitHub API Error: {}", e);
            e.to_response(GITHUB_ERROR)
        }
    }
}

/// GET /api/github/repos/top
/// Os 5 repositórios com mais estrelas
#[utoipa::path(
    get,
    path = "/api/github/repos/top",
    tag = "Projects",
    responses(
        (status = 200, description = "Up to five repositories, most starred first", body = [Repository]),
        (status = 500, description = "Missing token or GitHub failure", body = ErrorResponse)
    )
)]
pub async fn get_top_projects(state: web::Data<AppState>) -> HttpResponse {
    log::info!("⭐ GET /api/github/repos/top");

    match github_service::get_top_projects(&state).await {
        Ok(top) => HttpResponse::Ok().json(top),
        Err(e) => {
            log::error!("❌ GitHub API Error: {}", e);
            e.to_response(GITHUB_ERROR)
        }
    }
}
