use serde::{Deserialize, Serialize};
use crate::utils::AppError;

/// Repository as returned to the site: a narrow projection of the GitHub payload.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub html_url: String,
    pub owner: RepositoryOwner,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct RepositoryOwner {
    pub login: String,
    pub avatar_url: Option<String>,
}

// Everything optional so a missing field can be reported by name instead of
// surfacing as an opaque serde error.
#[derive(Debug, Deserialize, Default)]
pub struct RawRepository {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub html_url: Option<String>,
    pub owner: Option<RawOwner>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawOwner {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
}

impl TryFrom<RawRepository> for Repository {
    type Error = AppError;

    fn try_from(raw: RawRepository) -> Result<Self, Self::Error> {
        let owner = raw.owner.unwrap_or_default();

        Ok(Repository {
            id: raw.id.ok_or_else(|| missing("id"))?,
            name: raw.name.ok_or_else(|| missing("name"))?,
            description: raw.description,
            language: raw.language,
            stargazers_count: raw.stargazers_count.unwrap_or(0),
            forks_count: raw.forks_count.unwrap_or(0),
            html_url: raw.html_url.ok_or_else(|| missing("html_url"))?,
            owner: RepositoryOwner {
                login: owner.login.ok_or_else(|| missing("owner.login"))?,
                avatar_url: owner.avatar_url,
            },
        })
    }
}

fn missing(field: &str) -> AppError {
    AppError::MalformedUpstream(format!("GitHub repository payload is missing `{}`", field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_drops_unrelated_fields() {
        let raw: RawRepository = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "uploader",
            "full_name": "torikushiii/uploader",
            "description": null,
            "language": "JavaScript",
            "stargazers_count": 12,
            "forks_count": 3,
            "html_url": "https://github.com/torikushiii/uploader",
            "topics": ["cdn"],
            "owner": { "login": "torikushiii", "avatar_url": "https://avatars/1", "type": "User" }
        }))
        .unwrap();

        let repo = Repository::try_from(raw).unwrap();
        assert_eq!(repo.name, "uploader");
        assert_eq!(repo.description, None);
        assert_eq!(repo.owner.login, "torikushiii");

        let out = serde_json::to_value(&repo).unwrap();
        assert!(out.get("full_name").is_none());
        assert!(out.get("topics").is_none());
        assert_eq!(out["stargazers_count"], 12);
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let raw: RawRepository = serde_json::from_value(serde_json::json!({
            "id": 9,
            "name": "levelinfinite",
            "html_url": "https://github.com/torikushiii/levelinfinite",
            "owner": { "login": "torikushiii" }
        }))
        .unwrap();

        let repo = Repository::try_from(raw).unwrap();
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.forks_count, 0);
        assert_eq!(repo.language, None);
        assert_eq!(repo.owner.avatar_url, None);
    }

    #[test]
    fn test_missing_owner_login_is_malformed() {
        let raw: RawRepository = serde_json::from_value(serde_json::json!({
            "id": 9,
            "name": "levelinfinite",
            "html_url": "https://github.com/torikushiii/levelinfinite",
            "owner": {}
        }))
        .unwrap();

        let err = Repository::try_from(raw).unwrap_err();
        assert_eq!(
            err,
            AppError::MalformedUpstream("GitHub repository payload is missing `owner.login`".to_string())
        );
    }
}
