use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::clock::ClockArgs;
use crate::commands::config::ConfigCommands;
use crate::commands::format::FormatArgs;
use crate::commands::relative::RelativeArgs;

#[derive(Parser)]
#[command(
    name = "datekit",
    bin_name = "dk",
    version,
    about,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Format a date with a token pattern
    Format(FormatArgs),

    /// Render a number of seconds as HH:mm:ss
    Clock(ClockArgs),

    /// Describe a date relative to now ("just now", "today 18:31", ...)
    Relative(RelativeArgs),

    /// Configuration file tools
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Writes a completion script for `shell` to stdout.
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "dk", &mut std::io::stdout());
}
