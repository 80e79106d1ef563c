//! wiremock-based GitHub mock server for testing.
//!
//! Provides `GitHubMockServer` for HTTP-level mocking of the repository
//! endpoints. Used by the client, the store and the command tests.
//!
//! # Usage
//!
//! ```ignore
//! let mock = GitHubMockServer::start().await;
//! let account = mock.account("octocat");
//!
//! // Listing
//! account.list_page(1).names(&["a", "b"]).next(2).last(3).mount().await;
//! account.list_page(9).status(403).rate_limit(0, 1_700_000_000).mount().await;
//!
//! // Single repository
//! account.repository(7, "demo").get_by_id().await;
//! account.repository(7, "demo").description("[repodeck]").get_by_name().await;
//! account.repository(7, "demo").create().await;
//! account.repository(7, "demo").update().await;
//! account.repository(7, "demo").delete().await;
//! ```

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use super::client::GitHubClient;

pub const TEST_PER_PAGE: u32 = 6;

/// Create a mock repository JSON object.
pub fn mock_repository(owner: &str, id: u64, name: &str, description: Option<&str>) -> Value {
    json!({
        "id": id,
        "node_id": format!("R_{id}"),
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "private": false,
        "owner": {
            "login": owner,
            "id": 1,
            "type": "User"
        },
        "html_url": format!("https://github.com/{owner}/{name}"),
        "description": description,
        "fork": false,
        "url": format!("https://api.github.com/repos/{owner}/{name}"),
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "default_branch": "main"
    })
}

/// wiremock-based GitHub mock server.
///
/// Verifies actual HTTP requests rather than mocking at the trait level.
pub struct GitHubMockServer {
    server: MockServer,
}

impl GitHubMockServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get a GitHubClient configured to use this mock server.
    pub fn client(&self) -> GitHubClient {
        GitHubClient::with_base_url(&self.server.uri(), "test-token").unwrap()
    }

    /// The underlying wiremock server, for ad-hoc mocks and request inspection.
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Create an account context for building mocks.
    pub fn account<'a>(&'a self, login: &'a str) -> MockAccountContext<'a> {
        MockAccountContext {
            server: &self.server,
            login,
        }
    }
}

// ============ Builder Pattern API ============

/// Account context for building mocks.
pub struct MockAccountContext<'a> {
    server: &'a MockServer,
    login: &'a str,
}

impl<'a> MockAccountContext<'a> {
    /// Builder for `GET /users/{login}/repos?page={page}`.
    pub fn list_page(&self, page: u32) -> MockListBuilder<'a> {
        MockListBuilder {
            server: self.server,
            login: self.login,
            page,
            names: Vec::new(),
            links: Vec::new(),
            status: 200,
            rate_limit: None,
        }
    }

    /// Builder for endpoints addressing a single repository.
    pub fn repository(&self, id: u64, name: &'a str) -> MockRepositoryBuilder<'a> {
        MockRepositoryBuilder {
            server: self.server,
            login: self.login,
            id,
            name,
            description: None,
        }
    }
}

/// Builder for one page of the repository listing.
pub struct MockListBuilder<'a> {
    server: &'a MockServer,
    login: &'a str,
    page: u32,
    names: Vec<&'a str>,
    links: Vec<(&'static str, u32)>,
    status: u16,
    rate_limit: Option<(u64, i64)>,
}

impl<'a> MockListBuilder<'a> {
    /// Repository names on this page, in server order. Ids are assigned 1..
    pub fn names(mut self, names: &[&'a str]) -> Self {
        self.names = names.to_vec();
        self
    }

    pub fn prev(self, page: u32) -> Self {
        self.link("prev", page)
    }

    pub fn next(self, page: u32) -> Self {
        self.link("next", page)
    }

    pub fn last(self, page: u32) -> Self {
        self.link("last", page)
    }

    pub fn first(self, page: u32) -> Self {
        self.link("first", page)
    }

    fn link(mut self, rel: &'static str, page: u32) -> Self {
        self.links.push((rel, page));
        self
    }

    /// Respond with an error status and a GitHub error payload.
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn rate_limit(mut self, remaining: u64, reset_epoch_seconds: i64) -> Self {
        self.rate_limit = Some((remaining, reset_epoch_seconds));
        self
    }

    /// Mount mock for GET /users/{login}/repos?page={page}.
    pub async fn mount(self) {
        let login = self.login;
        let uri = self.server.uri();

        let mut template = if self.status == 200 {
            let repos: Vec<Value> = self
                .names
                .iter()
                .zip(1u64..)
                .map(|(name, id)| mock_repository(login, id, name, None))
                .collect();
            ResponseTemplate::new(200).set_body_json(repos)
        } else {
            let message = if self.status == 403 {
                "API rate limit exceeded"
            } else {
                "Server Error"
            };
            ResponseTemplate::new(self.status).set_body_json(json!({ "message": message }))
        };

        if !self.links.is_empty() {
            let link = self
                .links
                .iter()
                .map(|(rel, page)| {
                    format!(
                        "<{uri}/users/{login}/repos?page={page}&per_page={TEST_PER_PAGE}>; rel=\"{rel}\""
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            template = template.insert_header("link", link.as_str());
        }

        if let Some((remaining, reset)) = self.rate_limit {
            template = template
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", remaining.to_string().as_str())
                .insert_header("x-ratelimit-reset", reset.to_string().as_str());
        }

        Mock::given(method("GET"))
            .and(path(format!("/users/{login}/repos")))
            .and(query_param("page", self.page.to_string()))
            .respond_with(template)
            .mount(self.server)
            .await;
    }
}

/// Builder for single-repository endpoints.
pub struct MockRepositoryBuilder<'a> {
    server: &'a MockServer,
    login: &'a str,
    id: u64,
    name: &'a str,
    description: Option<&'a str>,
}

impl<'a> MockRepositoryBuilder<'a> {
    pub fn description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    fn body(&self) -> Value {
        mock_repository(self.login, self.id, self.name, self.description)
    }

    /// Mount mock for GET /repositories/{id}.
    pub async fn get_by_id(self) {
        Mock::given(method("GET"))
            .and(path(format!("/repositories/{}", self.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.body()))
            .mount(self.server)
            .await;
    }

    /// Mount mock for GET /repos/{login}/{name}.
    pub async fn get_by_name(self) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{}/{}", self.login, self.name)))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.body()))
            .mount(self.server)
            .await;
    }

    /// Mount mock for GET /repositories/{id} answering with a `null` body.
    pub async fn get_by_id_null(self) {
        Mock::given(method("GET"))
            .and(path(format!("/repositories/{}", self.id)))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(self.server)
            .await;
    }

    /// Mount mock for POST /user/repos, echoing the posted fields.
    pub async fn create(self) {
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .respond_with(EchoRepository {
                status: 201,
                base: self.body(),
            })
            .mount(self.server)
            .await;
    }

    /// Mount mock for PATCH /repos/{login}/{name}, applying the posted patch.
    pub async fn update(self) {
        Mock::given(method("PATCH"))
            .and(path(format!("/repos/{}/{}", self.login, self.name)))
            .respond_with(EchoRepository {
                status: 200,
                base: self.body(),
            })
            .mount(self.server)
            .await;
    }

    /// Mount mock for DELETE /repos/{login}/{name}.
    pub async fn delete(self) {
        Mock::given(method("DELETE"))
            .and(path(format!("/repos/{}/{}", self.login, self.name)))
            .respond_with(ResponseTemplate::new(204))
            .mount(self.server)
            .await;
    }

    /// Mount mock for DELETE /repos/{login}/{name} answering 404.
    pub async fn delete_not_found(self) {
        Mock::given(method("DELETE"))
            .and(path(format!("/repos/{}/{}", self.login, self.name)))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(self.server)
            .await;
    }
}

/// Responds with `base` overlaid by the fields of the JSON request body.
struct EchoRepository {
    status: u16,
    base: Value,
}

impl Respond for EchoRepository {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut body = self.base.clone();
        if let (Some(target), Ok(Value::Object(fields))) = (
            body.as_object_mut(),
            serde_json::from_slice::<Value>(&request.body),
        ) {
            target.extend(fields);
        }
        ResponseTemplate::new(self.status).set_body_json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::github::{NewRepository, RepoApi};

    #[tokio::test]
    async fn mock_server_lists_named_repositories() {
        let mock = GitHubMockServer::start().await;
        mock.account("octocat")
            .list_page(1)
            .names(&["a", "b"])
            .next(2)
            .mount()
            .await;

        let response = mock
            .client()
            .list_user_repos("octocat", 1, TEST_PER_PAGE)
            .await
            .unwrap();

        let names: Vec<_> = response.body.unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a", "b"]);
        let link = response.headers.get("link").unwrap().to_str().unwrap();
        assert!(link.ends_with("page=2&per_page=6>; rel=\"next\""));
    }

    #[tokio::test]
    async fn mock_server_echoes_created_fields() {
        let mock = GitHubMockServer::start().await;
        mock.account("octocat").repository(9, "x").create().await;

        let created = mock
            .client()
            .create_repository(&NewRepository {
                name: "x".to_string(),
                description: Some("hello".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.id, 9);
        assert_eq!(created.description.as_deref(), Some("hello"));
    }
}
