use anyhow::Context;
use clap::Subcommand;

use crate::shared::config::generate_schema;
use crate::shared::dirs::app_config_dir;

/// Configuration file helpers.
#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
pub enum ConfigCommands {
    /// Print JSON Schema for the configuration file
    Schema,

    /// Print where the configuration file is read from
    Path,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        let output = match self {
            Self::Schema => format!("{}\n", serde_json::to_string_pretty(&generate_schema())?),
            Self::Path => format!("{}\n", config_path()?),
        };
        print!("{output}");
        Ok(())
    }
}

fn config_path() -> anyhow::Result<String> {
    let dir = app_config_dir().context("Neither XDG_CONFIG_HOME nor HOME is set")?;
    Ok(dir.join("config.yaml").display().to_string())
}
