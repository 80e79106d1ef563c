use clap::Args;

use super::common::{format_page_footer, format_repository_table, with_spinner};
use crate::infra::github::RepoApi;
use crate::repos::{Pagination, RepoStore};

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct ListArgs {
    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run<C: RepoApi>(args: &ListArgs, store: &RepoStore<C>) -> anyhow::Result<()> {
    let output = with_spinner(store, "Fetching repositories...", run_with_store(args, store)).await?;
    print!("{output}");
    Ok(())
}

/// Fetch the page and render it from the store state.
pub(super) async fn run_with_store<C: RepoApi>(
    args: &ListArgs,
    store: &RepoStore<C>,
) -> anyhow::Result<String> {
    let page = store.list_repositories(args.page).await?;

    if args.json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&page)?));
    }

    let state = store.state();
    let mut output = format_repository_table(&state.repositories, &store.settings().project_tag);
    output.push('\n');
    output.push_str(&format_page_footer(&state.pagination, &state.rate_limit));
    output.push_str(&format_navigation(&state.pagination));
    Ok(output)
}

fn format_navigation(pagination: &Pagination) -> String {
    let mut hints = Vec::new();
    if pagination.has_prev() {
        hints.push(format!("--page {} for the previous page", pagination.current_page - 1));
    }
    if pagination.has_next() {
        hints.push(format!("--page {} for the next page", pagination.current_page + 1));
    }

    if hints.is_empty() {
        String::new()
    } else {
        format!("Use {}\n", hints.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::github::GitHubMockServer;
    use crate::repos::StoreSettings;
    use indoc::indoc;
    use rstest::rstest;

    fn args(page: u32) -> ListArgs {
        ListArgs { page, json: false }
    }

    #[tokio::test]
    async fn renders_table_and_footer() {
        let mock = GitHubMockServer::start().await;
        mock.account("octocat")
            .list_page(2)
            .names(&["alpha", "beta"])
            .prev(1)
            .next(3)
            .last(3)
            .mount()
            .await;
        let store = RepoStore::new(mock.client(), StoreSettings::new("octocat"));

        let output = run_with_store(&args(2), &store).await.unwrap();

        let expected = indoc! {"
            ID          NAME                          VISIBILITY  DESCRIPTION
            1           alpha                         public
            2           beta                          public

            Page 2/3
            Use --page 1 for the previous page, --page 3 for the next page
        "};
        assert_eq!(output, expected);
    }

    #[rstest]
    #[case::single(1, 1, "")]
    #[case::first(1, 2, "Use --page 2 for the next page\n")]
    #[case::last(3, 3, "Use --page 2 for the previous page\n")]
    fn navigation_hints(#[case] current_page: u32, #[case] total_pages: u32, #[case] expected: &str) {
        let pagination = Pagination {
            current_page,
            total_pages,
            total_known: true,
        };
        assert_eq!(format_navigation(&pagination), expected);
    }

    #[tokio::test]
    async fn json_output_includes_pagination() {
        let mock = GitHubMockServer::start().await;
        mock.account("octocat")
            .list_page(1)
            .names(&["alpha"])
            .next(2)
            .last(4)
            .mount()
            .await;
        let store = RepoStore::new(mock.client(), StoreSettings::new("octocat"));

        let output = run_with_store(&ListArgs { page: 1, json: true }, &store)
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["pagination"]["total_pages"], 4);
        assert_eq!(value["repositories"][0]["name"], "alpha");
        assert_eq!(value["repositories"][0]["full_name"], "octocat/alpha");
    }

    #[tokio::test]
    async fn rate_limited_page_returns_message() {
        let mock = GitHubMockServer::start().await;
        mock.account("octocat")
            .list_page(1)
            .status(403)
            .mount()
            .await;
        let store = RepoStore::new(mock.client(), StoreSettings::new("octocat"));

        let err = run_with_store(&args(1), &store).await.unwrap_err();

        assert_eq!(err.to_string(), "Rate limit exceeded. Try again later.");
    }
}
