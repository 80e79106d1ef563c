//! Helpers shared by the repository commands.

use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use anyhow::{Context, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::infra::github::rate_limit::RateLimit;
use crate::infra::github::{GitHubClient, RepoApi, Repository, resolve_token};
use crate::repos::{Pagination, RepoStore, StoreSettings};
use crate::shared::config::Config;
use crate::shared::env_var::EnvVars;
use crate::shared::table::{self, Column};

/// Build a store for the configured account. `REPODECK_ACCOUNT` wins over
/// `github.account`.
pub fn build_store(config: &Config, env: &EnvVars) -> anyhow::Result<RepoStore<GitHubClient>> {
    let account = env
        .account
        .clone()
        .or_else(|| config.github.account.clone())
        .context("No GitHub account configured. Set github.account in the config file or REPODECK_ACCOUNT.")?;

    let token = resolve_token(env);
    let timeout = config.http.timeout_secs.map(Duration::from_secs);
    let client = GitHubClient::new(&config.github.api_base_url, token, timeout)?;
    if !client.is_authenticated() {
        warn!("No GitHub token found; requests are sent unauthenticated");
    }

    Ok(RepoStore::new(
        client,
        StoreSettings::from_config(account, &config.github),
    ))
}

fn new_spinner(message: &str) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let s = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // static template string
    s.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner} {msg}")
            .expect("valid template"),
    );
    s.set_message(message.to_string());
    s.enable_steady_tick(Duration::from_millis(80));
    s
}

/// Await `future`, showing a spinner on stderr (terminals only) while the
/// store has a request in flight.
pub async fn with_spinner<C: RepoApi, F: Future>(
    store: &RepoStore<C>,
    message: &str,
    future: F,
) -> F::Output {
    let spinner = new_spinner(message);
    let mut states = store.subscribe();
    let follow = async {
        while states.changed().await.is_ok() {
            if !states.borrow_and_update().is_loading() {
                spinner.finish_and_clear();
            }
        }
    };

    tokio::pin!(future);
    let output = tokio::select! {
        output = &mut future => output,
        () = follow => future.await,
    };
    spinner.finish_and_clear();
    output
}

/// Refuse to touch `owner/name` unless its description carries the project
/// tag, i.e. repodeck created it.
pub async fn ensure_managed<C: RepoApi>(
    store: &RepoStore<C>,
    owner: &str,
    name: &str,
) -> anyhow::Result<()> {
    let repo = store.find_repository(owner, name).await?;
    let tag = &store.settings().project_tag;
    if !repo.is_managed(tag) {
        bail!(
            "{} was not created by repodeck (its description has no {tag}). Pass --force to change it anyway.",
            repo.full_name()
        );
    }
    Ok(())
}

/// Ask a yes/no question on stdout. Anything but "y" means no.
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    io::stdout().flush().ok();

    let mut input = String::new();
    io::stdin().read_line(&mut input).ok();
    input.trim().eq_ignore_ascii_case("y")
}

const TABLE_COLUMNS: [Column; 4] = [
    Column {
        title: "ID",
        width: 10,
    },
    Column {
        title: "NAME",
        width: 28,
    },
    Column {
        title: "VISIBILITY",
        width: 10,
    },
    Column {
        title: "DESCRIPTION",
        width: 60,
    },
];

pub fn visibility(repo: &Repository) -> &'static str {
    if repo.is_private() { "private" } else { "public" }
}

/// Render repositories as a table. Repositories carrying `project_tag` are
/// marked with `*`.
pub fn format_repository_table(repositories: &[Repository], project_tag: &str) -> String {
    if repositories.is_empty() {
        return "No repositories found.\n".to_string();
    }

    let rows: Vec<Vec<String>> = repositories
        .iter()
        .map(|repo| {
            let marker = if repo.is_managed(project_tag) { "*" } else { "" };
            vec![
                repo.id.to_string(),
                format!("{}{marker}", repo.name),
                visibility(repo).to_string(),
                repo.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    table::render(&TABLE_COLUMNS, &rows)
}

/// "Page 2/5", followed by the remaining rate limit when the server sent it.
pub fn format_page_footer(pagination: &Pagination, rate_limit: &RateLimit) -> String {
    let mut footer = format!(
        "Page {}/{}",
        pagination.current_page, pagination.total_pages
    );

    if let Some(remaining) = rate_limit.remaining {
        let limit = rate_limit
            .limit
            .map(|l| format!("/{l}"))
            .unwrap_or_default();
        footer.push_str(&format!("  Rate limit: {remaining}{limit} remaining"));
        if let Some(time) = rate_limit.reset_time() {
            footer.push_str(&format!(", resets at {time}"));
        }
    }

    footer.push('\n');
    footer
}
