//! Relative labels ("just now", "today 18:31", ...) derived from elapsed time.

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::format::{Formatter, format_instant};
use super::instant::{DateLike, Instant};

pub const JUST_NOW_MS: i64 = 120_000;
pub const ONE_DAY_MS: i64 = 86_400_000;
pub const TWO_DAYS_MS: i64 = 2 * ONE_DAY_MS;
pub const THREE_DAYS_MS: i64 = 3 * ONE_DAY_MS;

const CLOCK_PATTERN: &str = "HH:mm";
const ABSOLUTE_PATTERN: &str = "yyyy-MM-dd HH:mm";
const DAY_OF_MONTH_PATTERN: &str = "dd日";

/// Local midnight used as the base for [`seconds_to_clock`].
///
/// Must sit exactly on 00:00:00 so that added seconds land on the same
/// hour/minute/second a stopwatch would show.
pub const CLOCK_ANCHOR: NaiveDateTime = DateTime::<Utc>::UNIX_EPOCH.naive_utc();

/// Source of the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Elapsed-time range used to pick a label. Upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Up to two minutes ago, or any time in the future.
    JustNow,
    Today,
    Yesterday,
    DayBeforeYesterday,
    Older,
}

impl Bucket {
    pub fn classify(elapsed_ms: i64) -> Self {
        if elapsed_ms <= JUST_NOW_MS {
            Self::JustNow
        } else if elapsed_ms <= ONE_DAY_MS {
            Self::Today
        } else if elapsed_ms <= TWO_DAYS_MS {
            Self::Yesterday
        } else if elapsed_ms <= THREE_DAYS_MS {
            Self::DayBeforeYesterday
        } else {
            Self::Older
        }
    }
}

/// Fixed label set for relative output.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English labels ("just now", "today", ...).
    #[default]
    En,
    /// Chinese labels ("刚才", "今天", ...).
    Zh,
}

impl Locale {
    /// Label for a bucket, or `None` for [`Bucket::Older`] which renders a date instead.
    pub fn label(self, bucket: Bucket) -> Option<&'static str> {
        let label = match (self, bucket) {
            (_, Bucket::Older) => return None,
            (Self::En, Bucket::JustNow) => "just now",
            (Self::En, Bucket::Today) => "today",
            (Self::En, Bucket::Yesterday) => "yesterday",
            (Self::En, Bucket::DayBeforeYesterday) => "day before yesterday",
            (Self::Zh, Bucket::JustNow) => "刚才",
            (Self::Zh, Bucket::Today) => "今天",
            (Self::Zh, Bucket::Yesterday) => "昨天",
            (Self::Zh, Bucket::DayBeforeYesterday) => "前天",
        };
        Some(label)
    }
}

/// Renders targets relative to the time reported by a [`Clock`].
#[derive(Debug, Clone)]
pub struct RelativeTime<C: Clock, Tz: TimeZone> {
    clock: C,
    formatter: Formatter<Tz>,
    locale: Locale,
}

impl RelativeTime<SystemClock, Local> {
    pub fn local() -> Self {
        Self::new(SystemClock, Formatter::local())
    }
}

impl<C: Clock, Tz: TimeZone> RelativeTime<C, Tz> {
    pub fn new(clock: C, formatter: Formatter<Tz>) -> Self {
        Self {
            clock,
            formatter,
            locale: Locale::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Short label with clock time, e.g. `today 18:31` or `2018-12-10 18:31`.
    ///
    /// Returns an empty string when the target cannot be parsed.
    pub fn to_local_label(&self, target: impl Into<DateLike>) -> String {
        let Some((bucket, instant)) = self.classify(target) else {
            return String::new();
        };
        match (bucket, self.locale.label(bucket)) {
            (Bucket::JustNow, Some(label)) => label.to_string(),
            (_, Some(label)) => format!("{label} {}", format_instant(&instant, CLOCK_PATTERN)),
            (_, None) => format_instant(&instant, ABSOLUTE_PATTERN),
        }
    }

    /// Day-only label, e.g. `yesterday` or `07日`.
    ///
    /// Returns an empty string when the target cannot be parsed.
    pub fn to_day_label(&self, target: impl Into<DateLike>) -> String {
        let Some((bucket, instant)) = self.classify(target) else {
            return String::new();
        };
        match self.locale.label(bucket) {
            Some(label) => label.to_string(),
            None => format_instant(&instant, DAY_OF_MONTH_PATTERN),
        }
    }

    fn classify(&self, target: impl Into<DateLike>) -> Option<(Bucket, Instant)> {
        let now = self.clock.now();
        let instant = match target.into() {
            // Only `format` reads the number 0 as a missing date; here it is the epoch.
            DateLike::Millis(0) => {
                Instant::from_epoch_millis_in(0, self.formatter.time_zone()).ok()?
            }
            target => self.formatter.resolve(target)?,
        };
        let elapsed_ms = (now - instant.naive()).num_milliseconds();
        let bucket = Bucket::classify(elapsed_ms);
        tracing::trace!(elapsed_ms, ?bucket, "Classified relative time");
        Some((bucket, instant))
    }
}

/// See [`RelativeTime::to_local_label`]; uses the system clock and zone.
pub fn to_local_label(target: impl Into<DateLike>) -> String {
    RelativeTime::local().to_local_label(target)
}

/// See [`RelativeTime::to_day_label`]; uses the system clock and zone.
pub fn to_day_label(target: impl Into<DateLike>) -> String {
    RelativeTime::local().to_day_label(target)
}

/// Converts an elapsed number of seconds to `HH:mm:ss`, e.g. `60` to `00:01:00`.
///
/// Callers should keep `seconds` below 86 400; larger values wrap past midnight.
pub fn seconds_to_clock(seconds: i64) -> String {
    TimeDelta::try_seconds(seconds)
        .and_then(|delta| CLOCK_ANCHOR.checked_add_signed(delta))
        .map(|dt| format_instant(&Instant::new(dt), "HH:mm:ss"))
        .unwrap_or_default()
}
