mod cli;
mod commands;
mod infra;
mod repos;
mod shared;

use std::io::Write;

use clap::Parser;
use cli::{Cli, Commands};

use shared::config::load_config;
use shared::env_var::EnvVars;

#[tokio::main]
async fn main() {
    let Cli { command } = Cli::parse();

    if let Err(e) = run(command).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Completions { shell } => {
            std::io::stdout().write_all(&cli::completion_script(shell))?;
            Ok(())
        }
        Commands::Config(config_cmd) => config_cmd.run(),
        Commands::Repo(repo_cmd) => {
            let config = load_config()?;
            let env = EnvVars::load();
            shared::logging::init(config.log.format, env.log.as_deref());

            let store = commands::repo::common::build_store(&config, &env)?;
            repo_cmd.run(&store).await
        }
    }
}
