use clap::Args;

use super::common::{visibility, with_spinner};
use crate::infra::github::{RepoApi, Repository};
use crate::repos::RepoStore;

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct ShowArgs {
    /// Numeric repository id. Fetched without the token, so only public
    /// repositories resolve
    pub id: u64,

    /// Print the raw repository payload as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run<C: RepoApi>(args: &ShowArgs, store: &RepoStore<C>) -> anyhow::Result<()> {
    let output = with_spinner(store, "Fetching repository...", run_with_store(args, store)).await?;
    print!("{output}");
    Ok(())
}

pub(super) async fn run_with_store<C: RepoApi>(
    args: &ShowArgs,
    store: &RepoStore<C>,
) -> anyhow::Result<String> {
    let repo = store.fetch_repository_by_id(args.id).await?;

    if args.json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&repo)?));
    }
    Ok(format_repository(&repo, &store.settings().project_tag))
}

fn format_repository(repo: &Repository, project_tag: &str) -> String {
    let mut output = format!("{} ({})\n\n", repo.full_name(), visibility(repo));

    match repo.description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => output.push_str(&format!("  {description}\n")),
        None => output.push_str("  No description provided.\n"),
    }
    output.push('\n');

    output.push_str(&format!("ID:      {}\n", repo.id));
    if let Some(url) = repo.html_url() {
        output.push_str(&format!("URL:     {url}\n"));
    }
    output.push_str(&format!(
        "Managed: {}\n",
        if repo.is_managed(project_tag) { "yes" } else { "no" }
    ));
    output
}
