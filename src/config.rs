use crate::utils::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_GITHUB_REPOS: &[&str] = &[
    "torikushiii/BlueArchiveAPI",
    "torikushiii/starrail-auto",
    "torikushiii/hoyolab-auto",
    "torikushiii/DiscordTwitterBot",
    "torikushiii/HonkaiStarRailAPI",
    "torikushiii/youtube-archive",
    "torikushiii/uploader",
    "torikushiii/levelinfinite",
];

const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:4321",
    "http://127.0.0.1:4321",
    "http://localhost:3000",
];

/// Runtime configuration, read once from the environment at startup.
///
/// Credentials stay optional here: a missing one only breaks the endpoint that
/// needs it, and that endpoint reports it through [`AppConfig::require`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,

    pub github_token: Option<String>,
    pub discord_bot_token: Option<String>,
    pub discord_id: Option<String>,
    pub openweather_api_key: Option<String>,
    pub discord_webhook_url: Option<String>,

    pub github_repos: Vec<String>,

    pub github_cache_window: Duration,
    pub discord_cache_window: Duration,
    pub weather_cache_window: Duration,

    pub github_api_base: String,
    pub discord_api_base: String,
    pub openweather_base_url: String,

    pub upstream_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            cors_allowed_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            github_token: None,
            discord_bot_token: None,
            discord_id: None,
            openweather_api_key: None,
            discord_webhook_url: None,
            github_repos: DEFAULT_GITHUB_REPOS.iter().map(|s| s.to_string()).collect(),
            github_cache_window: Duration::from_secs(5 * 60),
            discord_cache_window: Duration::from_secs(5 * 60 * 60),
            weather_cache_window: Duration::from_secs(5 * 60),
            github_api_base: "https://api.github.com".to_string(),
            discord_api_base: "https://discord.com/api/v10".to_string(),
            openweather_base_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            upstream_timeout: Duration::from_secs(10),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any name -> value lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let secs = |name: &str, default: Duration| match get(name) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    log::warn!("⚠️  {}={} is not a number of seconds, using {}s", name, raw, default.as_secs());
                    default
                }
            },
            None => default,
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                log::warn!("⚠️  PORT={} is not a valid port, using {}", raw, defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };

        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_list(&raw))
                .unwrap_or(defaults.cors_allowed_origins),
            github_token: get("GITHUB_TOKEN"),
            discord_bot_token: get("DISCORD_BOT_TOKEN"),
            discord_id: get("DISCORD_ID"),
            openweather_api_key: get("OPENWEATHER_API_KEY"),
            discord_webhook_url: get("DISCORD_WEBHOOK_URL"),
            github_repos: get("GITHUB_REPOS")
                .map(|raw| split_list(&raw))
                .unwrap_or(defaults.github_repos),
            github_cache_window: secs("GITHUB_CACHE_SECS", defaults.github_cache_window),
            discord_cache_window: secs("DISCORD_CACHE_SECS", defaults.discord_cache_window),
            weather_cache_window: secs("WEATHER_CACHE_SECS", defaults.weather_cache_window),
            github_api_base: get("GITHUB_API_BASE").unwrap_or(defaults.github_api_base),
            discord_api_base: get("DISCORD_API_BASE").unwrap_or(defaults.discord_api_base),
            openweather_base_url: get("OPENWEATHER_BASE_URL").unwrap_or(defaults.openweather_base_url),
            upstream_timeout: secs("UPSTREAM_TIMEOUT_SECS", defaults.upstream_timeout),
        }
    }

    /// Returns the value of a required setting or a configuration error naming it.
    pub fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
        match value.as_deref() {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => {
                log::error!("❌ {} is not set", name);
                Err(AppError::Configuration(format!("{} is not set", name)))
            }
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Fully credentialed config whose upstreams all point at one mock server.
#[cfg(test)]
pub fn test_config(base: &str) -> AppConfig {
    AppConfig {
        github_token: Some("ghp_test".to_string()),
        discord_bot_token: Some("bot_test".to_string()),
        discord_id: Some("123456789".to_string()),
        openweather_api_key: Some("owm_test".to_string()),
        discord_webhook_url: Some(format!("{}/webhooks/1/abc", base)),
        github_api_base: base.to_string(),
        discord_api_base: format!("{}/api/v10", base),
        openweather_base_url: format!("{}/data/2.5/weather", base),
        ..AppConfig::default()
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = config_from(&[]);
        assert_eq!(config.port, 4000);
        assert_eq!(config.github_repos.len(), 8);
        assert_eq!(config.github_repos[0], "torikushiii/BlueArchiveAPI");
        assert_eq!(config.discord_cache_window, Duration::from_secs(18_000));
        assert!(config.github_token.is_none());
    }

    #[test]
    fn test_overrides_and_lists() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("GITHUB_REPOS", "a/one, b/two ,,"),
            ("WEATHER_CACHE_SECS", "60"),
            ("GITHUB_TOKEN", "ghp_x"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.github_repos, vec!["a/one".to_string(), "b/two".to_string()]);
        assert_eq!(config.weather_cache_window, Duration::from_secs(60));
        assert_eq!(config.github_token.as_deref(), Some("ghp_x"));
    }

    #[test]
    fn test_bad_numbers_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "http"), ("DISCORD_CACHE_SECS", "soon")]);
        assert_eq!(config.port, 4000);
        assert_eq!(config.discord_cache_window, Duration::from_secs(18_000));
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let config = config_from(&[("OPENWEATHER_API_KEY", "   ")]);
        let err = AppConfig::require(&config.openweather_api_key, "OPENWEATHER_API_KEY").unwrap_err();
        assert_eq!(err, AppError::Configuration("OPENWEATHER_API_KEY is not set".to_string()));
    }
}
