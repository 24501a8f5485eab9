mod api;
mod config;
mod middleware;
mod models;
mod services;
mod state;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::{Compress, Logger}, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::AppConfig::from_env();
    let bind_address = config.bind_address();
    let cors_origins = config.cors_allowed_origins.clone();

    log::info!("🚀 Starting Portfolio Service...");
    log::info!("🐙 Tracking {} GitHub repositories (cache {}s)",
        config.github_repos.len(), config.github_cache_window.as_secs());
    log::info!("💬 Discord presence cache {}s", config.discord_cache_window.as_secs());
    log::info!("🌤️  Weather cache {}s per city", config.weather_cache_window.as_secs());

    for (name, value) in [
        ("GITHUB_TOKEN", &config.github_token),
        ("DISCORD_BOT_TOKEN", &config.discord_bot_token),
        ("DISCORD_ID", &config.discord_id),
        ("OPENWEATHER_API_KEY", &config.openweather_api_key),
        ("DISCORD_WEBHOOK_URL", &config.discord_webhook_url),
    ] {
        if value.is_none() {
            log::warn!("⚠️  {} is not set, the endpoint that needs it will answer 500", name);
        }
    }

    let state = state::AppState::new(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let state = web::Data::new(state);

    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind_address);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().error_handler(api::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(api::query_error_handler))
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
