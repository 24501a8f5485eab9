use serde::{Deserialize, Serialize};

/// Body of `POST /api/contact`. Fields are optional at the wire level so a
/// missing one is reported as a validation error instead of a parse error.
#[derive(Debug, Serialize, Deserialize, Clone, Default, utoipa::ToSchema)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContactResponse {
    pub success: bool,
}

// Discord webhook body: https://discord.com/developers/docs/resources/webhook#execute-webhook
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Embed {
    pub title: String,
    pub fields: Vec<EmbedField>,
    pub color: u32,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}
