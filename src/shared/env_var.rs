//! Centralized reader for the environment variables repodeck honours.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const GITHUB_TOKEN: &str = "REPODECK_GITHUB_TOKEN";
const FALLBACK_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
const ACCOUNT: &str = "REPODECK_ACCOUNT";
const LOG: &str = "REPODECK_LOG";

/// Snapshot of the relevant environment variables at load time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvVars {
    /// Access token sent as `Authorization: token ...`.
    /// `REPODECK_GITHUB_TOKEN` wins over `GITHUB_TOKEN`.
    pub github_token: Option<String>,

    /// Overrides `github.account` from the config file.
    pub account: Option<String>,

    /// tracing filter directive, e.g. "repodeck=debug".
    pub log: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read the variables from the current process.
    pub fn load() -> Self {
        Self {
            github_token: non_empty_var(GITHUB_TOKEN).or_else(|| non_empty_var(FALLBACK_GITHUB_TOKEN)),
            account: non_empty_var(ACCOUNT),
            log: non_empty_var(LOG),
        }
    }
}
