//! GitHub REST API v3 client.
//!
//! Uses reqwest to fetch a repository's Actions public key and to store
//! secrets encrypted against it.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info};

use ghsecret_crypto::SealError;

use super::types::{EncryptedSecret, RepoPublicKey, SecretWrite};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type pinning the v3 API.
const GITHUB_V3_JSON: &str = "application/vnd.github.v3+json";

/// GitHub API client errors.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Encryption failed: {0}")]
    Encrypt(#[from] SealError),
}

/// Configuration for connecting to GitHub.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API root (e.g., "<https://api.github.com>").
    pub base_url: String,
    /// Account name for basic auth. Bearer auth is used when absent.
    pub username: Option<String>,
    /// Personal access token.
    pub token: String,
}

/// GitHub REST API v3 client.
#[derive(Debug)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
    username: Option<String>,
    token: String,
}

impl GitHubClient {
    /// Create a new GitHub API client.
    pub fn new(config: &GitHubConfig) -> Result<Self, GitHubError> {
        if config.base_url.is_empty() {
            return Err(GitHubError::Config("base_url is empty".into()));
        }
        if config.token.is_empty() {
            return Err(GitHubError::Config("token is empty".into()));
        }
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GitHubError::Config(format!("invalid base_url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GitHubError::Config(format!(
                "base_url cannot carry a path: {base_url}"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_V3_JSON));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("putsecret/", env!("CARGO_PKG_VERSION"))),
        );

        // reqwest is built with rustls-no-provider; Err means one is already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url,
            username: config.username.clone().filter(|u| !u.is_empty()),
            token: config.token.clone(),
        })
    }

    /// URL of `tail` under a repository's Actions secrets collection.
    ///
    /// Each argument is one path segment; `/`, `#`, `?` and the like are
    /// percent-encoded rather than changing the route.
    pub(crate) fn secrets_url(&self, owner: &str, repo: &str, tail: &str) -> Result<Url, GitHubError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitHubError::Config(format!("base_url cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["repos", owner, repo, "actions", "secrets", tail]);
        Ok(url)
    }

    /// Start an authenticated request.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.username {
            Some(user) => builder.basic_auth(user, Some(&self.token)),
            None => builder.bearer_auth(&self.token),
        }
    }

    /// Reject any status outside `accepted`.
    fn check_status(resp: &reqwest::Response, accepted: &[StatusCode]) -> Result<(), GitHubError> {
        let status = resp.status();
        if !accepted.contains(&status) {
            return Err(GitHubError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").into(),
            });
        }
        Ok(())
    }

    /// Fetch the public key secrets for `owner/repo` must be encrypted with.
    pub async fn get_public_key(&self, owner: &str, repo: &str) -> Result<RepoPublicKey, GitHubError> {
        let url = self.secrets_url(owner, repo, "public-key")?;
        debug!(%url, "fetching repository public key");

        let resp = self.request(Method::GET, url).send().await?;
        Self::check_status(&resp, &[StatusCode::OK])?;
        Ok(resp.json().await?)
    }

    /// Create or replace a secret with an already-encrypted value.
    pub async fn put_encrypted_secret(
        &self,
        owner: &str,
        repo: &str,
        secret_name: &str,
        secret: &EncryptedSecret,
    ) -> Result<SecretWrite, GitHubError> {
        let url = self.secrets_url(owner, repo, secret_name)?;
        debug!(%url, key_id = %secret.key_id, "storing secret");

        let resp = self.request(Method::PUT, url).json(secret).send().await?;
        Self::check_status(&resp, &[StatusCode::CREATED, StatusCode::NO_CONTENT])?;

        let outcome = if resp.status() == StatusCode::CREATED {
            SecretWrite::Created
        } else {
            SecretWrite::Updated
        };
        info!(owner, repo, secret = secret_name, %outcome, "stored secret");
        Ok(outcome)
    }

    /// Encrypt `secret_value` against `key` and store it as `secret_name`.
    pub async fn store_secret(
        &self,
        owner: &str,
        repo: &str,
        key: &RepoPublicKey,
        secret_name: &str,
        secret_value: &str,
    ) -> Result<SecretWrite, GitHubError> {
        let encrypted_value = ghsecret_crypto::encrypt(&key.key, secret_value)?;
        let secret = EncryptedSecret {
            key_id: key.key_id.clone(),
            encrypted_value,
        };
        self.put_encrypted_secret(owner, repo, secret_name, &secret)
            .await
    }
}
