use actix_web::{web, HttpResponse};
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use crate::state::AppState;

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// (requests, errors)
pub fn snapshot() -> (u64, u64) {
    (REQUEST_COUNT.load(Ordering::Relaxed), ERROR_COUNT.load(Ordering::Relaxed))
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String, content_type = "text/plain")
    )
)]
pub async fn get_metrics(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(render_metrics(&state))
}

pub fn render_metrics(state: &AppState) -> String {
    let (requests, errors) = snapshot();

    let mut metrics = format!(
        "# HELP http_requests_total Total number of HTTP requests\n\
         # TYPE http_requests_total counter\n\
         http_requests_total {}\n\
         \n\
         # HELP http_errors_total Total number of HTTP errors\n\
         # TYPE http_errors_total counter\n\
         http_errors_total {}\n",
        requests, errors
    );

    let caches = state.cache_stats();

    metrics.push_str("\n# HELP cache_hits_total Requests answered from a fresh cache entry\n# TYPE cache_hits_total counter\n");
    for (name, stats) in &caches {
        let _ = writeln!(metrics, "cache_hits_total{{cache=\"{}\"}} {}", name, stats.hits);
    }

    metrics.push_str("\n# HELP cache_misses_total Requests that went upstream\n# TYPE cache_misses_total counter\n");
    for (name, stats) in &caches {
        let _ = writeln!(metrics, "cache_misses_total{{cache=\"{}\"}} {}", name, stats.misses);
    }

    metrics.push_str("\n# HELP cache_entries Entries currently held\n# TYPE cache_entries gauge\n");
    for (name, stats) in &caches {
        let _ = writeln!(metrics, "cache_entries{{cache=\"{}\"}} {}", name, stats.entries);
    }

    metrics
}
