//! Token-substitution date formatting.
//!
//! A pattern is literal text interspersed with runs of token letters:
//!
//! | run    | value                                   |
//! |--------|-----------------------------------------|
//! | `yyyy` | year, as-is                             |
//! | `hh`   | `AM 09` / `PM 02` (12-hour, padded)     |
//! | `h`    | `AM9` / `PM2` (12-hour, unpadded)       |
//! | `M`    | month                                   |
//! | `d`    | day of month                            |
//! | `H`    | hour (24-hour)                          |
//! | `m`    | minute                                  |
//! | `s`    | second                                  |
//! | `q`    | quarter                                 |
//! | `S`    | millisecond                             |
//!
//! For the single-letter tokens a run of one letter yields the raw value and
//! a longer run left-pads it with zeros to two digits.

use chrono::{Local, TimeZone};
use lazy_regex::{Lazy, Regex, lazy_regex};

use super::instant::{DateLike, Instant};

pub const DEFAULT_PATTERN: &str = "yyyy-MM-dd";

static TOKEN_RUN_RE: Lazy<Regex> = lazy_regex!(r"y+|h+|M+|d+|H+|m+|s+|q+|S+");

/// Formats `source` with `pattern` in the system time zone.
///
/// Returns an empty string when the source is empty or cannot be parsed.
///
/// # Examples
/// ```
/// use datekit::date::format;
/// assert_eq!(format("2018-01-30", "yyyy-MM-dd"), "2018-01-30");
/// assert_eq!(format("2018-01-30 14:05", "hh:mm"), "PM 02:05");
/// assert_eq!(format("", "yyyy"), "");
/// ```
pub fn format(source: impl Into<DateLike>, pattern: &str) -> String {
    Formatter::local().format(source, pattern)
}

/// Date formatter bound to the time zone used to read epoch milliseconds.
#[derive(Debug, Clone)]
pub struct Formatter<Tz: TimeZone> {
    tz: Tz,
}

impl Formatter<Local> {
    pub fn local() -> Self {
        Self { tz: Local }
    }
}

impl<Tz: TimeZone> Formatter<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    /// Resolves `source` into an [`Instant`] in this formatter's zone.
    pub fn resolve(&self, source: impl Into<DateLike>) -> Option<Instant> {
        let source = source.into();
        match source.resolve_in(&self.tz) {
            Ok(instant) => Some(instant),
            Err(e) => {
                tracing::debug!(?source, error = %e, "Date source did not resolve");
                None
            }
        }
    }

    pub fn format(&self, source: impl Into<DateLike>, pattern: &str) -> String {
        self.resolve(source)
            .map(|instant| format_instant(&instant, pattern))
            .unwrap_or_default()
    }
}

/// Substitutes every token run in `pattern` with the matching field of `instant`.
pub fn format_instant(instant: &Instant, pattern: &str) -> String {
    // Substituted text is appended to the output and never scanned again, so
    // the `M` in `PM` is not mistaken for a month token.
    TOKEN_RUN_RE
        .replace_all(pattern, |caps: &regex::Captures| {
            let run = &caps[0];
            let token = run.chars().next().unwrap_or_default();
            render_run(instant, token, run.len())
        })
        .into_owned()
}

fn render_run(instant: &Instant, token: char, len: usize) -> String {
    match token {
        'y' => {
            let mut out = instant.year().to_string().repeat(len / 4);
            out.push_str(&"y".repeat(len % 4));
            out
        }
        'h' => {
            let mut out = hour12_padded(instant.hour()).repeat(len / 2);
            if len % 2 == 1 {
                out.push_str(&hour12(instant.hour()));
            }
            out
        }
        _ => match field_value(instant, token) {
            Some(value) if len == 1 => value.to_string(),
            Some(value) => format!("{value:02}"),
            None => token.to_string().repeat(len),
        },
    }
}

/// Field table for the single-letter tokens.
fn field_value(instant: &Instant, token: char) -> Option<u32> {
    let value = match token {
        'M' => instant.month(),
        'd' => instant.day(),
        'H' => instant.hour(),
        'm' => instant.minute(),
        's' => instant.second(),
        'q' => instant.quarter(),
        'S' => instant.millisecond(),
        _ => return None,
    };
    Some(value)
}

fn hour12_padded(hour: u32) -> String {
    if hour > 11 {
        format!("PM {:02}", hour - 12)
    } else {
        format!("AM {hour:02}")
    }
}

fn hour12(hour: u32) -> String {
    if hour > 11 {
        format!("PM{}", hour - 12)
    } else {
        format!("AM{hour}")
    }
}
