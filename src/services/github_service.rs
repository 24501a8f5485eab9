use futures::future::try_join_all;
use std::sync::Arc;
use crate::{
    config::AppConfig,
    models::{RawRepository, Repository},
    services::upstream,
    state::AppState,
    utils::AppError,
};

pub const TOP_PROJECTS_LIMIT: usize = 5;

const GITHUB_USER_AGENT: &str = "ennead";

/// Busca a lista de repositórios acompanhados, servindo do cache enquanto fresca
pub async fn get_repositories(state: &AppState) -> Result<Arc<Vec<Repository>>, AppError> {
    let token = AppConfig::require(&state.config.github_token, "GITHUB_TOKEN")?;

    state
        .repositories
        .get_or_fetch(&(), move || async move {
            fetch_repositories(state, token).await.map(Arc::new)
        })
        .await
}

/// Top projects by stars, derived from the cached list at read time.
pub async fn get_top_projects(state: &AppState) -> Result<Vec<Repository>, AppError> {
    let repos = get_repositories(state).await?;
    Ok(top_projects(&repos, TOP_PROJECTS_LIMIT))
}

/// One request per tracked repository, all in flight at once. Any single
/// failure fails the whole listing; there is no partial result.
pub async fn fetch_repositories(state: &AppState, token: &str) -> Result<Vec<Repository>, AppError> {
    log::info!("🐙 Fetching {} repositories from GitHub", state.config.github_repos.len());

    let requests = state
        .config
        .github_repos
        .iter()
        .map(|repo| fetch_repository(&state.http, &state.config.github_api_base, token, repo));

    let repos = try_join_all(requests).await?;

    log::info!("✅ Fetched {} repositories", repos.len());
    Ok(repos)
}

pub async fn fetch_repository(
    client: &reqwest::Client,
    api_base: &str,
    token: &str,
    repo: &str,
) -> Result<Repository, AppError> {
    let url = format!("{}/repos/{}", api_base.trim_end_matches('/'), encode_repo_path(repo));

    let response = client
        .get(&url)
        .header("Authorization", format!("token {}", token))
        .header("Accept", "application/vnd.github.v3+json")
        .header("User-Agent", GITHUB_USER_AGENT)
        .send()
        .await
        .map_err(|e| {
            let e = e.without_url();
            log::error!("❌ GitHub request for {} failed: {}", repo, e);
            AppError::from(e)
        })?;

    let raw: RawRepository = upstream::read_json("GitHub", repo, response).await?;
    Repository::try_from(raw)
}

/// Stable sort by stars, descending: equal counts keep their fetch order.
pub fn top_projects(repos: &[Repository], limit: usize) -> Vec<Repository> {
    let mut sorted = repos.to_vec();
    sorted.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    sorted.truncate(limit);
    sorted
}

fn encode_repo_path(repo: &str) -> String {
    repo.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
