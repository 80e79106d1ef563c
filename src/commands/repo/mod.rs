//! Commands operating on the configured account's repositories.

pub mod common;
mod create;
mod delete;
mod edit;
mod list;
mod open;
mod show;

use clap::Subcommand;

use crate::infra::github::RepoApi;
use crate::repos::RepoStore;

#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
pub enum RepoCommands {
    /// List one page of repositories
    List(list::ListArgs),

    /// Show a public repository by its numeric id (private ones are not found)
    Show(show::ShowArgs),

    /// Create a repository tagged as managed by repodeck
    Create(create::CreateArgs),

    /// Update a repository's name, description, homepage or visibility
    Edit(edit::EditArgs),

    /// Delete a repository
    Delete(delete::DeleteArgs),

    /// Open a public repository's page in the browser (private ones are not found)
    Open(open::OpenArgs),
}

impl RepoCommands {
    pub async fn run<C: RepoApi>(&self, store: &RepoStore<C>) -> anyhow::Result<()> {
        match self {
            Self::List(args) => list::run(args, store).await,
            Self::Show(args) => show::run(args, store).await,
            Self::Create(args) => create::run(args, store).await,
            Self::Edit(args) => edit::run(args, store).await,
            Self::Delete(args) => delete::run(args, store).await,
            Self::Open(args) => open::run(args, store).await,
        }
    }
}
