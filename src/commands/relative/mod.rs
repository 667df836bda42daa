use chrono::TimeZone;
use clap::Args;

use super::error::{CommandError, Result};
use datekit::date::{Clock, DateLike, FixedClock, Formatter, Locale, RelativeTime, SystemClock};
use datekit::shared::config::Config;

#[derive(Args, Clone, PartialEq, Eq)]
pub struct RelativeArgs {
    /// Target date: "2018-12-10 18:31:37", RFC 3339, or epoch milliseconds
    pub target: String,

    /// Print the day-only label ("yesterday", "07日") instead of label and clock time
    #[arg(long)]
    pub day: bool,

    /// Reference time to compare against instead of the current time
    #[arg(long, value_name = "DATETIME")]
    pub now: Option<String>,

    /// Label language (default: relative.locale from config)
    #[arg(long, value_enum)]
    pub locale: Option<Locale>,
}

impl RelativeArgs {
    pub fn run(&self, config: &Config) -> Result<()> {
        let formatter = Formatter::local();
        let line = match &self.now {
            Some(now) => {
                let clock = fixed_clock(now, formatter.time_zone())?;
                self.render(clock, formatter, config)
            }
            None => self.render(SystemClock, formatter, config),
        };
        println!("{line}");
        Ok(())
    }

    fn render<C: Clock, Tz: TimeZone>(
        &self,
        clock: C,
        formatter: Formatter<Tz>,
        config: &Config,
    ) -> String {
        let locale = self.locale.unwrap_or(config.relative.locale);
        let relative = RelativeTime::new(clock, formatter).with_locale(locale);
        let target = DateLike::from(&self.target);
        if self.day {
            relative.to_day_label(target)
        } else {
            relative.to_local_label(target)
        }
    }
}

fn fixed_clock<Tz: TimeZone>(now: &str, tz: &Tz) -> Result<FixedClock> {
    let instant = DateLike::from(now)
        .resolve_in(tz)
        .map_err(|source| CommandError::InvalidNow {
            value: now.to_string(),
            source,
        })?;
    Ok(FixedClock(instant.naive()))
}
