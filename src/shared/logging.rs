//! tracing subscriber setup. Logs go to stderr so command output on stdout
//! stays pipeable.

use tracing_subscriber::EnvFilter;

use super::config::LogFormat;

const DEFAULT_FILTER: &str = "repodeck=warn";

/// Build the filter from `REPODECK_LOG`, falling back to warnings only.
fn env_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(format: LogFormat, directive: Option<&str>) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive))
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(e) = result {
        tracing::debug!("tracing subscriber already installed: {e}");
    }
}
