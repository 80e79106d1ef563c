//! Errors surfaced by repository store operations.

use thiserror::Error;

use crate::infra::github::GitHubError;
use crate::infra::github::rate_limit::format_reset_time;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Page must be at least 1, got {0}")]
    InvalidPage(u32),

    #[error("Page {page} is past the last page ({total_pages})")]
    PageOutOfRange { page: u32, total_pages: u32 },

    #[error("Repository not found")]
    NotFound,

    /// 403 on a listing call.
    #[error("{}", rate_limited_message(.reset_epoch_seconds))]
    RateLimited { reset_epoch_seconds: Option<i64> },

    /// Transport or any other API failure; displays the underlying message.
    #[error(transparent)]
    Api(#[from] GitHubError),
}

fn rate_limited_message(reset_epoch_seconds: &Option<i64>) -> String {
    match reset_epoch_seconds.and_then(format_reset_time) {
        Some(time) => format!("Rate limit exceeded. Try again at {time}."),
        None => "Rate limit exceeded. Try again later.".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, RepoError>;
