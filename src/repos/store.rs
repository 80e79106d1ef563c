//! Repository store: wraps the API calls and keeps an observable copy of
//! the current page, pagination, rate limit and request states.

use reqwest::StatusCode;
use reqwest::header::LINK;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::error::{RepoError, Result};
use super::pagination::Pagination;
use super::state::{CacheSync, Edited, Operation, Page, RequestState, StoreState};
use crate::infra::github::link::parse_link_header;
use crate::infra::github::rate_limit::RateLimit;
use crate::infra::github::{NewRepository, RepoApi, Repository, RepositoryPatch};
use crate::shared::config::GitHubConfig;

/// Fixed parameters of a store, resolved once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Account whose repositories are listed.
    pub account: String,
    pub per_page: u32,
    /// Appended to the description of every created repository.
    pub project_tag: String,
    /// Used when a repository is created without a description.
    pub default_description: String,
}

impl StoreSettings {
    /// Settings with the configuration defaults.
    #[cfg(test)]
    pub fn new(account: impl Into<String>) -> Self {
        Self::from_config(account, &GitHubConfig::default())
    }

    pub fn from_config(account: impl Into<String>, config: &GitHubConfig) -> Self {
        Self {
            account: account.into(),
            per_page: config.per_page,
            project_tag: config.project_tag.clone(),
            default_description: config.default_description.clone(),
        }
    }
}

pub struct RepoStore<C> {
    client: C,
    settings: StoreSettings,
    state: watch::Sender<StoreState>,
}

impl<C: RepoApi> RepoStore<C> {
    pub fn new(client: C, settings: StoreSettings) -> Self {
        Self {
            client,
            settings,
            state: watch::Sender::new(StoreState::default()),
        }
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change, including loading toggles.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Fetch one page of the account's repositories and make it the current
    /// page. Rate-limit state is refreshed whenever a response arrives.
    pub async fn list_repositories(&self, page: u32) -> Result<Page> {
        self.begin(Operation::List);
        let result = self.run_list(page).await;
        self.finish(Operation::List, result)
    }

    async fn run_list(&self, page: u32) -> Result<Page> {
        if page == 0 {
            return Err(RepoError::InvalidPage(page));
        }
        let known = self.state.borrow().pagination;
        if !known.contains(page) {
            return Err(RepoError::PageOutOfRange {
                page,
                total_pages: known.total_pages,
            });
        }

        let response = match self
            .client
            .list_user_repos(&self.settings.account, page, self.settings.per_page)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let rate_limit = err.response_headers().map(RateLimit::from_headers);
                if let Some(rate_limit) = rate_limit {
                    self.state.send_modify(|s| s.rate_limit = rate_limit);
                }
                if err.status() == Some(StatusCode::FORBIDDEN) {
                    let reset_epoch_seconds = rate_limit.and_then(|r| r.reset_epoch_seconds);
                    warn!(page, ?reset_epoch_seconds, "GitHub rate limit exhausted");
                    return Err(RepoError::RateLimited {
                        reset_epoch_seconds,
                    });
                }
                return Err(err.into());
            }
        };

        let rate_limit = RateLimit::from_headers(&response.headers);
        let links = response
            .headers
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(parse_link_header);
        let repositories = response.body.unwrap_or_default();

        let mut pagination = Pagination::default();
        self.state.send_modify(|s| {
            s.rate_limit = rate_limit;
            s.pagination = s.pagination.advance(page, links.as_ref());
            if s.pagination.contains(page) {
                s.repositories = repositories.clone();
            }
            pagination = s.pagination;
        });
        if !pagination.contains(page) {
            debug!(page, total_pages = pagination.total_pages, "page is past the last page");
            return Err(RepoError::PageOutOfRange {
                page,
                total_pages: pagination.total_pages,
            });
        }
        debug!(
            page,
            total_pages = pagination.total_pages,
            count = repositories.len(),
            "listed repositories"
        );

        Ok(Page {
            repositories,
            pagination,
            rate_limit,
        })
    }

    /// Fetch a single repository by its numeric id and store it as the
    /// current repository.
    pub async fn fetch_repository_by_id(&self, id: u64) -> Result<Repository> {
        self.begin(Operation::Fetch);
        let result: Result<Repository> = async {
            let repository = self
                .client
                .get_repository(id)
                .await?
                .ok_or(RepoError::NotFound)?;
            self.state
                .send_modify(|s| s.repository = Some(repository.clone()));
            Ok(repository)
        }
        .await;
        self.finish(Operation::Fetch, result)
    }

    /// Resolve `owner/name` from the current page, or with one request when
    /// it is not there. A 404 is `RepoError::NotFound`.
    pub async fn find_repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let cached = self
            .state
            .borrow()
            .repositories
            .iter()
            .find(|r| r.name == name && self.owned_by(r, owner))
            .cloned();
        if let Some(repository) = cached {
            return Ok(repository);
        }

        self.begin(Operation::Fetch);
        let result: Result<Repository> = async {
            let repository = match self.client.get_repository_by_name(owner, name).await {
                Ok(repository) => repository,
                Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => None,
                Err(err) => return Err(err.into()),
            };
            repository.ok_or(RepoError::NotFound)
        }
        .await;
        self.finish(Operation::Fetch, result)
    }

    fn owned_by(&self, repository: &Repository, owner: &str) -> bool {
        match &repository.owner {
            Some(o) => o.login == owner,
            None => owner == self.settings.account,
        }
    }

    /// Create a repository, tagging its description, and put it first in
    /// the current page.
    pub async fn create_repository(&self, mut data: NewRepository) -> Result<Repository> {
        self.begin(Operation::Create);
        data.description = Some(self.tag_description(data.description.as_deref()));
        let result: Result<Repository> = async {
            let created = self.client.create_repository(&data).await?;
            self.state
                .send_modify(|s| s.repositories.insert(0, created.clone()));
            Ok(created)
        }
        .await;
        self.finish(Operation::Create, result)
    }

    /// Update `owner/name` and replace the local entry that had `name`.
    pub async fn edit_repository(
        &self,
        owner: &str,
        name: &str,
        patch: &RepositoryPatch,
    ) -> Result<Edited> {
        self.begin(Operation::Edit);
        let result: Result<Edited> = async {
            let updated = self.client.update_repository(owner, name, patch).await?;
            let mut cache = CacheSync::Missing;
            self.state.send_modify(|s| {
                if let Some(entry) = s.repositories.iter_mut().find(|r| r.name == name) {
                    *entry = updated.clone();
                    cache = CacheSync::Updated;
                }
            });
            if cache == CacheSync::Missing {
                debug!(owner, name, "edited repository is not in the current page");
            }
            Ok(Edited {
                repository: updated,
                cache,
            })
        }
        .await;
        self.finish(Operation::Edit, result)
    }

    /// Delete `owner/name` and drop every local entry with that name.
    pub async fn delete_repository(&self, owner: &str, name: &str) -> Result<CacheSync> {
        self.begin(Operation::Delete);
        let result: Result<CacheSync> = async {
            self.client.delete_repository(owner, name).await?;
            let mut removed = 0;
            self.state.send_modify(|s| {
                let before = s.repositories.len();
                s.repositories.retain(|r| r.name != name);
                removed = before - s.repositories.len();
            });
            Ok(if removed == 0 {
                debug!(owner, name, "deleted repository is not in the current page");
                CacheSync::Missing
            } else {
                CacheSync::Removed(removed)
            })
        }
        .await;
        self.finish(Operation::Delete, result)
    }

    fn tag_description(&self, description: Option<&str>) -> String {
        let base = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(&self.settings.default_description);
        format!("{base} {}", self.settings.project_tag)
            .trim_start()
            .to_string()
    }

    fn begin(&self, operation: Operation) {
        self.state.send_modify(|s| {
            *s.requests.get_mut(operation) = RequestState {
                loading: true,
                error: None,
            };
        });
    }

    fn finish<T>(&self, operation: Operation, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            debug!(?operation, error = %err, "repository operation failed");
        }
        self.state.send_modify(|s| {
            let request = s.requests.get_mut(operation);
            request.loading = false;
            if let Err(err) = &result {
                request.error = Some(err.to_string());
            }
        });
        result
    }
}
