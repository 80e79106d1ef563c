use anyhow::bail;
use clap::Args;

use super::common::{ensure_managed, with_spinner};
use crate::infra::github::{RepoApi, RepositoryPatch};
use crate::repos::RepoStore;

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct EditArgs {
    /// Current repository name
    pub name: String,

    /// Repository owner (default: the configured account)
    #[arg(long)]
    pub owner: Option<String>,

    /// Rename the repository
    #[arg(long)]
    pub new_name: Option<String>,

    /// Replace the description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Replace the homepage URL
    #[arg(long)]
    pub homepage: Option<String>,

    /// Make the repository private
    #[arg(long, conflicts_with = "public")]
    pub private: bool,

    /// Make the repository public
    #[arg(long)]
    pub public: bool,

    /// Edit even if the repository was not created by repodeck
    #[arg(long)]
    pub force: bool,
}

impl EditArgs {
    fn to_patch(&self) -> RepositoryPatch {
        let private = match (self.private, self.public) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        RepositoryPatch {
            name: self.new_name.clone(),
            description: self.description.clone(),
            homepage: self.homepage.clone(),
            private,
            ..Default::default()
        }
    }
}

pub async fn run<C: RepoApi>(args: &EditArgs, store: &RepoStore<C>) -> anyhow::Result<()> {
    let output = with_spinner(store, "Updating repository...", run_with_store(args, store)).await?;
    print!("{output}");
    Ok(())
}

pub(super) async fn run_with_store<C: RepoApi>(
    args: &EditArgs,
    store: &RepoStore<C>,
) -> anyhow::Result<String> {
    let patch = args.to_patch();
    if patch.is_empty() {
        bail!(
            "Nothing to change. Pass at least one of --new-name, --description, --homepage, --private or --public."
        );
    }

    let owner = args.owner.as_deref().unwrap_or(&store.settings().account);
    if !args.force {
        ensure_managed(store, owner, &args.name).await?;
    }
    let edited = store.edit_repository(owner, &args.name, &patch).await?;
    Ok(format!("Updated {}\n", edited.repository.full_name()))
}
