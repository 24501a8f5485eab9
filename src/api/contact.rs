use actix_web::{web, HttpResponse};
use crate::{
    api::ErrorResponse,
    models::{ContactRequest, ContactResponse},
    services::contact_service,
    state::AppState,
};

/// POST /api/contact
/// Repassa a mensagem do formulário para o webhook (sem retry, sem persistência)
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message relayed", body = ContactResponse),
        (status = 400, description = "Name or message missing", body = ErrorResponse),
        (status = 500, description = "Webhook not configured or rejected the message", body = ErrorResponse)
    )
)]
pub async fn submit_contact(
    body: web::Json<ContactRequest>,
    state: web::Data<AppState>,
) -> HttpResponse {
    log::info!("📨 POST /api/contact");

    match contact_service::submit_contact(&state, body.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(ContactResponse { success: true }),
        Err(e) => {
            log::error!("❌ Webhook Error: {}", e);
            e.to_response("Failed to send message")
        }
    }
}
