//! GitHub REST API client implementation using reqwest.

use std::process::Command;
use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap};
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{GitHubError, Result, parse_error_payload};
use crate::shared::env_var::EnvVars;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "repodeck";
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Characters escaped inside a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Whether a request carries the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Token,
    Anonymous,
}

/// A decoded response body (absent when the body was empty or `null`)
/// together with the response headers.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub body: Option<T>,
    pub headers: HeaderMap,
}

/// Production implementation using reqwest.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client for `base_url`.
    ///
    /// Without a token every request is sent anonymously, which works for
    /// public reads at a lower rate limit and fails for writes.
    pub fn new(base_url: &str, token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        Url::parse(base_url).map_err(|e| GitHubError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Create a client pointed at a custom base URL (used with mock servers).
    #[cfg(test)]
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self> {
        Self::new(base_url, Some(token.to_string()), None)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Send a request and decode its JSON body.
    ///
    /// `path` must start with `/`; dynamic segments should go through
    /// [`encode_segment`].
    pub async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        auth: Auth,
    ) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "GitHub API request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, GITHUB_JSON);
        if !query.is_empty() {
            request = request.query(query);
        }
        if auth == Auth::Token
            && let Some(token) = &self.token
        {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        debug!(%method, %url, status = status.as_u16(), "GitHub API response");

        if !status.is_success() {
            return Err(GitHubError::Status {
                status,
                message: parse_error_payload(&bytes),
                headers,
            });
        }

        Ok(ApiResponse {
            body: decode_body(&bytes)?,
            headers,
        })
    }
}

fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice::<Option<T>>(bytes)?)
}

/// Percent-encode one path segment (owner or repository name).
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Resolve the access token: `REPODECK_GITHUB_TOKEN`, then `GITHUB_TOKEN`,
/// then `gh auth token`. Returns `None` when nothing is available.
pub fn resolve_token(env: &EnvVars) -> Option<String> {
    if let Some(token) = env.github_token.clone() {
        return Some(token);
    }
    match get_gh_token() {
        Ok(token) => Some(token),
        Err(e) => {
            debug!("no token from gh: {e}");
            None
        }
    }
}

/// Get GitHub token from `gh auth token` command.
/// This reuses the authentication from GitHub CLI.
fn get_gh_token() -> Result<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .map_err(|e| GitHubError::TokenError(format!("failed to run gh auth token: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitHubError::TokenError(format!(
            "gh auth token failed: {}",
            stderr.trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(GitHubError::TokenError(
            "gh auth token returned empty token".to_string(),
        ));
    }

    Ok(token)
}
