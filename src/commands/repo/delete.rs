use clap::Args;

use super::common::{confirm, ensure_managed, with_spinner};
use crate::infra::github::RepoApi;
use crate::repos::RepoStore;

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct DeleteArgs {
    /// Repository name
    pub name: String,

    /// Repository owner (default: the configured account)
    #[arg(long)]
    pub owner: Option<String>,

    /// Delete without confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Delete even if the repository was not created by repodeck
    #[arg(long)]
    pub force: bool,
}

pub async fn run<C: RepoApi>(args: &DeleteArgs, store: &RepoStore<C>) -> anyhow::Result<()> {
    if !args.yes {
        let owner = owner(args, store);
        if !confirm(&format!("Delete {owner}/{}? This cannot be undone.", args.name)) {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let output = with_spinner(store, "Deleting repository...", run_with_store(args, store)).await?;
    print!("{output}");
    Ok(())
}

fn owner<'a, C: RepoApi>(args: &'a DeleteArgs, store: &'a RepoStore<C>) -> &'a str {
    args.owner.as_deref().unwrap_or(&store.settings().account)
}

pub(super) async fn run_with_store<C: RepoApi>(
    args: &DeleteArgs,
    store: &RepoStore<C>,
) -> anyhow::Result<String> {
    let owner = owner(args, store);
    if !args.force {
        ensure_managed(store, owner, &args.name).await?;
    }
    store.delete_repository(owner, &args.name).await?;
    Ok(format!("Deleted {owner}/{}\n", args.name))
}
