//! Repository operations.

use reqwest::Method;

use super::client::{ApiResponse, Auth, GitHubClient, encode_segment};
use super::error::{GitHubError, Result};
use super::types::{NewRepository, Repository, RepositoryPatch};

/// Trait for repository operations.
#[async_trait::async_trait]
pub trait RepoApi: Send + Sync {
    /// List one page of an account's repositories. Headers are returned so
    /// the caller can read pagination and rate-limit state.
    async fn list_user_repos(
        &self,
        account: &str,
        page: u32,
        per_page: u32,
    ) -> Result<ApiResponse<Vec<Repository>>>;

    /// Look up a repository by its numeric id. `None` for an empty body.
    async fn get_repository(&self, id: u64) -> Result<Option<Repository>>;

    /// Look up `owner/name`. Sent with the token so private repositories
    /// resolve too.
    async fn get_repository_by_name(&self, owner: &str, name: &str) -> Result<Option<Repository>>;

    /// Create a repository for the authenticated user.
    async fn create_repository(&self, data: &NewRepository) -> Result<Repository>;

    async fn update_repository(
        &self,
        owner: &str,
        name: &str,
        patch: &RepositoryPatch,
    ) -> Result<Repository>;

    async fn delete_repository(&self, owner: &str, name: &str) -> Result<()>;
}

fn repo_path(owner: &str, name: &str) -> String {
    format!("/repos/{}/{}", encode_segment(owner), encode_segment(name))
}

#[async_trait::async_trait]
impl RepoApi for GitHubClient {
    async fn list_user_repos(
        &self,
        account: &str,
        page: u32,
        per_page: u32,
    ) -> Result<ApiResponse<Vec<Repository>>> {
        let path = format!("/users/{}/repos", encode_segment(account));
        let query = [("page", page.to_string()), ("per_page", per_page.to_string())];
        self.send::<(), _>(Method::GET, &path, &query, None, Auth::Token)
            .await
    }

    async fn get_repository(&self, id: u64) -> Result<Option<Repository>> {
        let path = format!("/repositories/{id}");
        let response = self
            .send::<(), Repository>(Method::GET, &path, &[], None, Auth::Anonymous)
            .await?;
        Ok(response.body)
    }

    async fn get_repository_by_name(&self, owner: &str, name: &str) -> Result<Option<Repository>> {
        let response = self
            .send::<(), Repository>(Method::GET, &repo_path(owner, name), &[], None, Auth::Token)
            .await?;
        Ok(response.body)
    }

    async fn create_repository(&self, data: &NewRepository) -> Result<Repository> {
        let response = self
            .send(Method::POST, "/user/repos", &[], Some(data), Auth::Token)
            .await?;
        response
            .body
            .ok_or(GitHubError::EmptyResponse("repository creation"))
    }

    async fn update_repository(
        &self,
        owner: &str,
        name: &str,
        patch: &RepositoryPatch,
    ) -> Result<Repository> {
        let response = self
            .send(
                Method::PATCH,
                &repo_path(owner, name),
                &[],
                Some(patch),
                Auth::Token,
            )
            .await?;
        response
            .body
            .ok_or(GitHubError::EmptyResponse("repository update"))
    }

    async fn delete_repository(&self, owner: &str, name: &str) -> Result<()> {
        self.send::<(), serde_json::Value>(
            Method::DELETE,
            &repo_path(owner, name),
            &[],
            None,
            Auth::Token,
        )
        .await?;
        Ok(())
    }
}
