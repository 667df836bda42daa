use clap::Args;

use datekit::date::{DateLike, Formatter};
use datekit::shared::config::Config;

#[derive(Args, Clone, PartialEq, Eq)]
pub struct FormatArgs {
    /// Date to format: "2018-01-30", "2018-01-30 18:31:37", RFC 3339, or epoch milliseconds
    pub source: String,

    /// Token pattern, e.g. "yyyy-MM-dd HH:mm:ss" (default: format.default_pattern from config)
    #[arg(short, long)]
    pub pattern: Option<String>,
}

impl FormatArgs {
    pub fn run(&self, config: &Config) -> anyhow::Result<()> {
        println!("{}", self.render(&Formatter::local(), config));
        Ok(())
    }

    fn render<Tz: chrono::TimeZone>(&self, formatter: &Formatter<Tz>, config: &Config) -> String {
        let pattern = self
            .pattern
            .as_deref()
            .unwrap_or(&config.format.default_pattern);
        formatter.format(DateLike::from(&self.source), pattern)
    }
}
