use serde::de::DeserializeOwned;
use crate::utils::AppError;

/// Checks the status of an upstream response and decodes its JSON body.
///
/// On a non-2xx status the status and body go to the log and the caller only
/// gets an `AppError::Upstream`. `target` names what was asked for; it is
/// logged in place of the URL, which may carry credentials.
pub async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    target: &str,
    response: reqwest::Response,
) -> Result<T, AppError> {
    let body = ensure_success(service, target, response).await?;

    serde_json::from_str(&body).map_err(|e| {
        log::error!("❌ {} returned an unreadable payload for {}: {}", service, target, e);
        AppError::MalformedUpstream(format!("{} payload could not be parsed: {}", service, e))
    })
}

/// Returns the body text of a 2xx response, or logs and converts anything else.
pub async fn ensure_success(
    service: &'static str,
    target: &str,
    response: reqwest::Response,
) -> Result<String, AppError> {
    let status = response.status();
    let body = response.text().await.map_err(AppError::from)?;

    if !status.is_success() {
        log::error!("❌ {} API error for {}: {} {}", service, target, status, body);
        return Err(AppError::Upstream {
            service,
            status: status.as_u16(),
            detail: body,
        });
    }

    Ok(body)
}

/// Host part of `url`, for log lines about endpoints whose path is itself a secret.
pub fn host_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "<unparseable url>".to_string())
}
