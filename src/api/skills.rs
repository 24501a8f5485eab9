use actix_web::HttpResponse;
use crate::services::skills_service;

/// GET /api/skills
#[utoipa::path(
    get,
    path = "/api/skills",
    tag = "Skills",
    responses(
        (status = 200, description = "Skill categories in display order")
    )
)]
pub async fn get_skills() -> HttpResponse {
    HttpResponse::Ok().json(skills_service::skill_categories())
}
