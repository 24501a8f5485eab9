use std::sync::Arc;
use crate::{
    config::AppConfig,
    models::{PresenceProfile, RawDiscordUser},
    services::upstream,
    state::AppState,
    utils::AppError,
};

pub async fn get_presence(state: &AppState) -> Result<Arc<PresenceProfile>, AppError> {
    let token = AppConfig::require(&state.config.discord_bot_token, "DISCORD_BOT_TOKEN")?;
    let user_id = AppConfig::require(&state.config.discord_id, "DISCORD_ID")?;

    state
        .presence
        .get_or_fetch(&(), move || async move {
            fetch_presence(&state.http, &state.config.discord_api_base, token, user_id)
                .await
                .map(Arc::new)
        })
        .await
}

pub async fn fetch_presence(
    client: &reqwest::Client,
    api_base: &str,
    token: &str,
    user_id: &str,
) -> Result<PresenceProfile, AppError> {
    log::info!("💬 Fetching Discord profile for {}", user_id);

    let url = format!(
        "{}/users/{}",
        api_base.trim_end_matches('/'),
        urlencoding::encode(user_id)
    );

    let response = client
        .get(&url)
        .header("Authorization", format!("Bot {}", token))
        .send()
        .await
        .map_err(|e| {
            let e = e.without_url();
            log::error!("❌ Discord request for {} failed: {}", user_id, e);
            AppError::from(e)
        })?;

    let raw: RawDiscordUser = upstream::read_json("Discord", user_id, response).await?;
    PresenceProfile::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::utils::ManualClock;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_json() -> serde_json::Value {
        serde_json::json!({
            "id": "123456789",
            "username": "ennead",
            "avatar": "abc",
            "global_name": "Ennead",
            "banner": "ban",
            "email": "never@forwarded.dev",
            "flags": 0
        })
    }

    #[tokio::test]
    async fn test_profile_is_cached_for_the_window() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v10/users/123456789"))
            .and(header("Authorization", "Bot bot_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .expect(1)
            .mount(&server)
            .await;

        let clock = ManualClock::new();
        let state = AppState::with_clock(test_config(&server.uri()), clock.clone()).unwrap();

        let first = get_presence(&state).await.unwrap();
        clock.advance(Duration::from_secs(60 * 60 * 4));
        let second = get_presence(&state).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.global_name.as_deref(), Some("Ennead"));
        assert_eq!(first.banner.as_deref(), Some("ban"));
    }

    #[tokio::test]
    async fn test_upstream_error_after_expiry_keeps_old_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let clock = ManualClock::new();
        let state = AppState::with_clock(test_config(&server.uri()), clock.clone()).unwrap();

        get_presence(&state).await.unwrap();
        let before = state.presence.peek(&()).unwrap();

        clock.advance(state.presence.window());
        let err = get_presence(&state).await.unwrap_err();

        assert!(matches!(err, AppError::Upstream { service: "Discord", status: 503, .. }));
        let after = state.presence.peek(&()).unwrap();
        assert_eq!(after.fetched_at, before.fetched_at);
        assert_eq!(after.value, before.value);
    }

    #[tokio::test]
    async fn test_missing_user_id_is_a_configuration_error() {
        let mut config = test_config("http://127.0.0.1:9");
        config.discord_id = None;
        let state = AppState::with_clock(config, ManualClock::new()).unwrap();

        let err = get_presence(&state).await.unwrap_err();
        assert_eq!(err, AppError::Configuration("DISCORD_ID is not set".to_string()));
    }
}
