use crate::{
    config::AppConfig,
    models::{PresenceProfile, Repository, WeatherReport},
    utils::{AppError, CacheStats, Clock, SystemClock, TtlCache},
};
use std::sync::Arc;

/// Everything a handler needs, built once in `main` and shared through `web::Data`.
pub struct AppState {
    pub config: AppConfig,
    pub http: reqwest::Client,
    /// Single entry: the whole tracked-repository list.
    pub repositories: TtlCache<(), Arc<Vec<Repository>>, AppError>,
    /// Single entry: the configured Discord user.
    pub presence: TtlCache<(), Arc<PresenceProfile>, AppError>,
    /// One entry per city string, as typed by the caller.
    pub weather: TtlCache<String, WeatherReport, AppError>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self {
            repositories: TtlCache::with_clock("github", config.github_cache_window, clock.clone()),
            presence: TtlCache::with_clock("discord", config.discord_cache_window, clock.clone()),
            weather: TtlCache::with_clock("weather", config.weather_cache_window, clock),
            http,
            config,
        })
    }

    pub fn cache_stats(&self) -> Vec<(&'static str, CacheStats)> {
        vec![
            (self.repositories.name(), self.repositories.stats()),
            (self.presence.name(), self.presence.stats()),
            (self.weather.name(), self.weather.stats()),
        ]
    }
}
