use clap::Args;

use super::common::with_spinner;
use crate::infra::github::{NewRepository, RepoApi, Repository};
use crate::repos::RepoStore;

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct CreateArgs {
    /// Repository name
    pub name: String,

    /// Description; the project tag is appended automatically
    #[arg(short, long)]
    pub description: Option<String>,

    /// Homepage URL
    #[arg(long)]
    pub homepage: Option<String>,

    /// Create a private repository
    #[arg(long)]
    pub private: bool,
}

impl CreateArgs {
    fn to_new_repository(&self) -> NewRepository {
        NewRepository {
            name: self.name.clone(),
            description: self.description.clone(),
            homepage: self.homepage.clone(),
            private: self.private.then_some(true),
        }
    }
}

pub async fn run<C: RepoApi>(args: &CreateArgs, store: &RepoStore<C>) -> anyhow::Result<()> {
    let output = with_spinner(store, "Creating repository...", run_with_store(args, store)).await?;
    print!("{output}");
    Ok(())
}

pub(super) async fn run_with_store<C: RepoApi>(
    args: &CreateArgs,
    store: &RepoStore<C>,
) -> anyhow::Result<String> {
    let created = store.create_repository(args.to_new_repository()).await?;
    Ok(format_created(&created))
}

fn format_created(repo: &Repository) -> String {
    let mut output = format!("Created {} (id {})\n", repo.full_name(), repo.id);
    if let Some(url) = repo.html_url() {
        output.push_str(&format!("  {url}\n"));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::github::GitHubMockServer;
    use crate::repos::StoreSettings;
    use indoc::indoc;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn args(name: &str) -> CreateArgs {
        CreateArgs {
            name: name.to_string(),
            description: None,
            homepage: None,
            private: false,
        }
    }

    #[tokio::test]
    async fn creates_tagged_repository() {
        let mock = GitHubMockServer::start().await;
        mock.account("octocat").repository(100, "notes").create().await;
        let store = RepoStore::new(mock.client(), StoreSettings::new("octocat"));

        let output = run_with_store(&args("notes"), &store).await.unwrap();

        let expected = indoc! {"
            Created octocat/notes (id 100)
              https://github.com/octocat/notes
        "};
        assert_eq!(output, expected);
        let state = store.state();
        assert_eq!(state.repositories.len(), 1);
        assert_eq!(
            state.repositories[0].description.as_deref(),
            Some("[repodeck]")
        );
    }

    #[tokio::test]
    async fn sends_optional_fields_only_when_given() {
        let mock = GitHubMockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .and(body_json(serde_json::json!({
                "name": "site",
                "description": "Homepage [repodeck]",
                "homepage": "https://example.com",
                "private": true
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 5,
                "name": "site"
            })))
            .expect(1)
            .mount(mock.server())
            .await;
        let store = RepoStore::new(mock.client(), StoreSettings::new("octocat"));

        let output = run_with_store(
            &CreateArgs {
                name: "site".to_string(),
                description: Some("Homepage".to_string()),
                homepage: Some("https://example.com".to_string()),
                private: true,
            },
            &store,
        )
        .await
        .unwrap();

        assert_eq!(output, "Created site (id 5)\n");
    }

    #[test]
    fn public_by_default_leaves_private_unset() {
        assert_eq!(args("x").to_new_repository().private, None);
    }
}
