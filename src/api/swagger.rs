use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio Service API",
        version = "1.0.0",
        description = "Backend for the portfolio site.\n\n**Features:**\n- GitHub project listing (cached 5 min)\n- Discord presence card (cached for hours)\n- Weather by city (cached 5 min per city)\n- Contact form relay to a Discord webhook\n- Health monitoring and metrics"
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Projects
        crate::api::projects::get_repositories,
        crate::api::projects::get_top_projects,

        // Presence
        crate::api::presence::get_presence,

        // Weather
        crate::api::weather::get_weather,

        // Contact
        crate::api::contact::submit_contact,

        // Skills
        crate::api::skills::get_skills,
    ),
    components(
        schemas(
            crate::api::ErrorResponse,
            crate::api::health::HealthResponse,
            crate::api::health::Integrations,
            crate::models::Repository,
            crate::models::RepositoryOwner,
            crate::models::PresenceProfile,
            crate::models::AvatarDecoration,
            crate::models::GuildTag,
            crate::models::Collectibles,
            crate::models::Nameplate,
            crate::models::WeatherReport,
            crate::models::ContactRequest,
            crate::models::ContactResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
        (name = "Projects", description = "GitHub repositories shown on the projects page."),
        (name = "Presence", description = "Discord profile rendered by the presence card."),
        (name = "Weather", description = "Current temperature for the clock widget."),
        (name = "Contact", description = "Contact form submissions, relayed to a webhook."),
        (name = "Skills", description = "Static skill list rendered on the skills page."),
    )
)]
pub struct ApiDoc;
