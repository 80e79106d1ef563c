//! Observable store state.

use serde::Serialize;

use super::pagination::Pagination;
use crate::infra::github::Repository;
use crate::infra::github::rate_limit::RateLimit;

/// Store operations, each with its own request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Fetch,
    Create,
    Edit,
    Delete,
}

/// Progress of the most recent call of one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestState {
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestStates {
    pub list: RequestState,
    pub fetch: RequestState,
    pub create: RequestState,
    pub edit: RequestState,
    pub delete: RequestState,
}

impl RequestStates {
    pub fn get(&self, operation: Operation) -> &RequestState {
        match operation {
            Operation::List => &self.list,
            Operation::Fetch => &self.fetch,
            Operation::Create => &self.create,
            Operation::Edit => &self.edit,
            Operation::Delete => &self.delete,
        }
    }

    pub(super) fn get_mut(&mut self, operation: Operation) -> &mut RequestState {
        match operation {
            Operation::List => &mut self.list,
            Operation::Fetch => &mut self.fetch,
            Operation::Create => &mut self.create,
            Operation::Edit => &mut self.edit,
            Operation::Delete => &mut self.delete,
        }
    }
}

/// Everything a view needs to render: the current page of repositories,
/// the last fetched single repository, pagination, rate limit and
/// per-operation request states.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub repositories: Vec<Repository>,
    pub repository: Option<Repository>,
    pub pagination: Pagination,
    pub rate_limit: RateLimit,
    pub requests: RequestStates,
}

impl StoreState {
    pub fn is_loading(&self) -> bool {
        [
            Operation::List,
            Operation::Fetch,
            Operation::Create,
            Operation::Edit,
            Operation::Delete,
        ]
        .into_iter()
        .any(|op| self.requests.get(op).loading)
    }
}

/// How a write-through mutation affected the local collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSync {
    /// The edited entry was replaced.
    Updated,
    /// This many entries with the deleted name were removed.
    Removed(usize),
    /// No entry with that name was held locally; the local page may be stale.
    Missing,
}

/// Result of a successful edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Edited {
    pub repository: Repository,
    pub cache: CacheSync,
}

/// Result of a successful listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub repositories: Vec<Repository>,
    pub pagination: Pagination,
    pub rate_limit: RateLimit,
}
