use chrono::{SecondsFormat, Utc};
use crate::{
    config::AppConfig,
    models::{ContactRequest, Embed, EmbedField, WebhookPayload},
    services::upstream,
    state::AppState,
    utils::AppError,
};

const EMBED_TITLE: &str = "New Contact Form Submission";
const EMBED_COLOR: u32 = 0x00ff00;
const EMAIL_PLACEHOLDER: &str = "Not provided";

/// A contact submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Option<String>,
    pub message: String,
}

impl TryFrom<ContactRequest> for ContactSubmission {
    type Error = AppError;

    fn try_from(req: ContactRequest) -> Result<Self, Self::Error> {
        let name = req.name.filter(|n| !n.trim().is_empty());
        let message = req.message.filter(|m| !m.trim().is_empty());

        match (name, message) {
            (Some(name), Some(message)) => Ok(ContactSubmission {
                name,
                email: req.email.filter(|e| !e.trim().is_empty()),
                message,
            }),
            _ => Err(AppError::Validation("Name and message are required".to_string())),
        }
    }
}

/// Validates and relays one submission to the webhook. One attempt, no retry.
pub async fn submit_contact(state: &AppState, req: ContactRequest) -> Result<(), AppError> {
    let submission = ContactSubmission::try_from(req)?;
    let webhook_url = AppConfig::require(&state.config.discord_webhook_url, "DISCORD_WEBHOOK_URL")?;

    let payload = build_webhook_payload(&submission, &Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    log::info!("📨 Relaying contact message from {}", submission.name);

    let response = state
        .http
        .post(webhook_url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| {
            let e = e.without_url();
            log::error!("❌ Webhook request to {} failed: {}", upstream::host_of(webhook_url), e);
            AppError::from(e)
        })?;

    // The webhook token lives in the URL path, only the host is safe to log.
    upstream::ensure_success("Webhook", &upstream::host_of(webhook_url), response).await?;

    log::info!("✅ Contact message delivered");
    Ok(())
}

pub fn build_webhook_payload(submission: &ContactSubmission, timestamp: &str) -> WebhookPayload {
    WebhookPayload {
        embeds: vec![Embed {
            title: EMBED_TITLE.to_string(),
            fields: vec![
                EmbedField {
                    name: "Name".to_string(),
                    value: submission.name.clone(),
                    inline: Some(true),
                },
                EmbedField {
                    name: "Email".to_string(),
                    value: submission
                        .email
                        .clone()
                        .unwrap_or_else(|| EMAIL_PLACEHOLDER.to_string()),
                    inline: Some(true),
                },
                EmbedField {
                    name: "Message".to_string(),
                    value: submission.message.clone(),
                    inline: None,
                },
            ],
            color: EMBED_COLOR,
            timestamp: timestamp.to_string(),
        }],
    }
}
