use anyhow::Context;
use clap::Args;

use super::common::with_spinner;
use crate::infra::github::RepoApi;
use crate::repos::RepoStore;

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct OpenArgs {
    /// Numeric repository id. Fetched without the token, so only public
    /// repositories resolve
    pub id: u64,
}

pub async fn run<C: RepoApi>(args: &OpenArgs, store: &RepoStore<C>) -> anyhow::Result<()> {
    let url = with_spinner(store, "Fetching repository...", run_with_store(args, store)).await?;
    println!("Opening {url}");
    open::that(&url).with_context(|| format!("Failed to open {url} in a browser"))?;
    Ok(())
}

/// Resolve the web URL of the repository.
pub(super) async fn run_with_store<C: RepoApi>(
    args: &OpenArgs,
    store: &RepoStore<C>,
) -> anyhow::Result<String> {
    let repo = store.fetch_repository_by_id(args.id).await?;
    let url = repo
        .html_url()
        .with_context(|| format!("Repository {} has no web URL", repo.full_name()))?;
    Ok(url.to_string())
}
