use clap::Subcommand;

use datekit::shared::config::{self, Config};

/// Configuration management commands.
#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print JSON Schema for the configuration file
    Schema,

    /// Print the effective configuration after defaults are applied
    Show,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Schema => {
                let schema = config::generate_schema();
                let json = serde_json::to_string_pretty(&schema)?;
                println!("{json}");
            }
            Self::Show => {
                let config = config::load_config()?;
                print!("{}", render_yaml(&config)?);
            }
        }
        Ok(())
    }
}

/// Effective configuration in the same YAML layout as config.yaml.
fn render_yaml(config: &Config) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(config)?)
}
