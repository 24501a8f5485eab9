use serde::{Deserialize, Serialize};
use crate::utils::AppError;

/// Discord profile trimmed down to what the presence card renders.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct PresenceProfile {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
    pub global_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_decoration_data: Option<AvatarDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clan: Option<GuildTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_guild: Option<GuildTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collectibles: Option<Collectibles>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct AvatarDecoration {
    pub asset: Option<String>,
    pub sku_id: Option<String>,
    pub expires_at: Option<i64>,
}

/// Server tag shown next to the name (`clan` on older payloads, `primary_guild` on newer ones).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct GuildTag {
    pub identity_guild_id: Option<String>,
    pub identity_enabled: Option<bool>,
    pub tag: Option<String>,
    pub badge: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct Collectibles {
    pub nameplate: Option<Nameplate>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct Nameplate {
    pub sku_id: Option<String>,
    pub asset: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawDiscordUser {
    pub id: Option<String>,
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub global_name: Option<String>,
    pub banner: Option<String>,
    pub avatar_decoration_data: Option<AvatarDecoration>,
    pub clan: Option<GuildTag>,
    pub primary_guild: Option<GuildTag>,
    pub collectibles: Option<Collectibles>,
}

impl TryFrom<RawDiscordUser> for PresenceProfile {
    type Error = AppError;

    fn try_from(raw: RawDiscordUser) -> Result<Self, Self::Error> {
        let missing = |field: &str| {
            AppError::MalformedUpstream(format!("Discord user payload is missing `{}`", field))
        };

        Ok(PresenceProfile {
            id: raw.id.ok_or_else(|| missing("id"))?,
            username: raw.username.ok_or_else(|| missing("username"))?,
            avatar: raw.avatar,
            global_name: raw.global_name,
            banner: raw.banner,
            avatar_decoration_data: raw.avatar_decoration_data,
            clan: raw.clan,
            primary_guild: raw.primary_guild,
            collectibles: raw.collectibles,
        })
    }
}
