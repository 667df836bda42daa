mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use datekit::shared::config;
use datekit::shared::env_var::EnvVars;
use datekit::shared::logging;

fn main() -> anyhow::Result<()> {
    let Cli { command } = Cli::parse();

    logging::init(&EnvVars::load());

    match command {
        Commands::Format(args) => args.run(&config::load_config()?)?,
        Commands::Clock(args) => args.run()?,
        Commands::Relative(args) => args.run(&config::load_config()?)?,
        Commands::Config(config_cmd) => config_cmd.run()?,
        Commands::Completions { shell } => cli::print_completions(shell),
    }

    Ok(())
}
