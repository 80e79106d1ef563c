//! GitHub API error types.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Failed to get GitHub token: {0}")]
    TokenError(String),

    #[error("Invalid GitHub API base URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. Headers are kept so callers can read rate-limit state.
    #[error("Request failed with status code {}{}", .status.as_u16(), format_api_message(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
        headers: HeaderMap,
    },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Empty response body from {0}")]
    EmptyResponse(&'static str),
}

impl GitHubError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Headers of the failed response, if one was received.
    pub fn response_headers(&self) -> Option<&HeaderMap> {
        match self {
            Self::Status { headers, .. } => Some(headers),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;

fn format_api_message(message: &Option<String>) -> String {
    match message.as_deref() {
        Some(m) if !m.is_empty() => format!(": {m}"),
        _ => String::new(),
    }
}

/// Extract the `message` field from a GitHub error payload, plus any
/// `errors[]` details like "[name is already_exists]".
pub(crate) fn parse_error_payload(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let message = value.get("message").and_then(|m| m.as_str())?;
    let details = value
        .get("errors")
        .and_then(|e| e.as_array())
        .map(|errors| format_error_details(errors))
        .unwrap_or_default();
    Some(format!("{message}{details}"))
}

/// Format error details from GitHub API errors array.
/// Returns a formatted string like " [field1 is code1, field2 is code2]" or empty string.
fn format_error_details(errors: &[serde_json::Value]) -> String {
    let error_details: Vec<String> = errors
        .iter()
        .filter_map(|e| {
            let field = e.get("field").and_then(|v| v.as_str());
            let code = e.get("code").and_then(|v| v.as_str());
            match (field, code) {
                (Some(f), Some(c)) => Some(format!("{f} is {c}")),
                (Some(f), None) => Some(f.to_string()),
                (None, Some(c)) => Some(c.to_string()),
                (None, None) => None,
            }
        })
        .collect();

    if error_details.is_empty() {
        String::new()
    } else {
        format!(" [{}]", error_details.join(", "))
    }
}
