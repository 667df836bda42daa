//! Normalization of heterogeneous date sources into a local wall-clock [`Instant`].

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use lazy_regex::{regex_captures, regex_is_match};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InstantError {
    #[error("Empty date source")]
    Empty,

    #[error("Unparseable date: {0}")]
    Unparseable(String),

    #[error("Epoch milliseconds out of range: {0}")]
    OutOfRange(i64),
}

/// Anything that can be turned into an [`Instant`].
///
/// Mirrors the loosely typed inputs accepted by the formatter: a native
/// date/time value, a string, or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLike {
    Empty,
    DateTime(NaiveDateTime),
    Text(String),
    Millis(i64),
}

impl From<&str> for DateLike {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DateLike {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for DateLike {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for DateLike {
    fn from(value: i64) -> Self {
        Self::Millis(value)
    }
}

impl From<NaiveDateTime> for DateLike {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveDate> for DateLike {
    fn from(value: NaiveDate) -> Self {
        Self::DateTime(value.and_time(NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateLike {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(value.naive_local())
    }
}

impl From<&Instant> for DateLike {
    fn from(value: &Instant) -> Self {
        Self::DateTime(value.0)
    }
}

impl<T: Into<DateLike>> From<Option<T>> for DateLike {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

impl DateLike {
    /// Resolves the source into an [`Instant`], interpreting epoch
    /// milliseconds and offset timestamps as wall-clock time in `tz`.
    pub fn resolve_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<Instant, InstantError> {
        match self {
            Self::Empty | Self::Millis(0) => Err(InstantError::Empty),
            Self::DateTime(dt) => Ok(Instant(*dt)),
            // Numbers go through the same text normalization as strings, so a
            // negative value turns into a `/`-prefixed string and is rejected.
            Self::Millis(ms) => resolve_text(&ms.to_string(), tz),
            Self::Text(text) if text.is_empty() => Err(InstantError::Empty),
            Self::Text(text) => resolve_text(text, tz),
        }
    }
}

/// A fully resolved local calendar/clock value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(NaiveDateTime);

impl Instant {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn year(&self) -> i32 {
        chrono::Datelike::year(&self.0)
    }

    pub fn month(&self) -> u32 {
        chrono::Datelike::month(&self.0)
    }

    pub fn day(&self) -> u32 {
        chrono::Datelike::day(&self.0)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Milliseconds within the second. Leap-second nanos are folded back into 0..=999.
    pub fn millisecond(&self) -> u32 {
        (self.0.nanosecond() / 1_000_000) % 1000
    }

    /// Quarter of the year: months 1-3 map to 1, 10-12 to 4.
    pub fn quarter(&self) -> u32 {
        (self.month() + 2) / 3
    }
}

impl Instant {
    /// Wall-clock time in `tz` at `ms` milliseconds after the Unix epoch.
    pub fn from_epoch_millis_in<Tz: TimeZone>(ms: i64, tz: &Tz) -> Result<Self, InstantError> {
        match tz.timestamp_millis_opt(ms) {
            LocalResult::Single(dt) => Ok(Self(dt.naive_local())),
            LocalResult::Ambiguous(earliest, _) => Ok(Self(earliest.naive_local())),
            LocalResult::None => Err(InstantError::OutOfRange(ms)),
        }
    }
}

impl From<NaiveDateTime> for Instant {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

fn resolve_text<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<Instant, InstantError> {
    // Offset timestamps must be recognized before `-` is rewritten, or a
    // negative offset would be mangled into a path separator.
    if let Ok(dt) = DateTime::parse_from_rfc3339(text.trim()) {
        return Ok(Instant(dt.with_timezone(tz).naive_local()));
    }

    let normalized = text.replace('-', "/");
    if let Some(ms) = numeric_millis(&normalized) {
        return Instant::from_epoch_millis_in(ms, tz);
    }

    parse_wall_clock(normalized.trim())
        .map(Instant)
        .ok_or_else(|| InstantError::Unparseable(text.to_string()))
}

/// Integer part of a purely numeric string, read as epoch milliseconds.
fn numeric_millis(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if !regex_is_match!(r"^[+]?\d+(\.\d*)?$", trimmed) {
        return None;
    }
    let integer = trimmed.split('.').next().unwrap_or(trimmed);
    integer.parse().ok()
}

/// Parses `Y/M[/D][( |T)H:m[:s[.fff]]]` with one- or two-digit fields.
fn parse_wall_clock(text: &str) -> Option<NaiveDateTime> {
    if let Some((_, year, month)) = regex_captures!(r"^(\d{1,6})/(\d{1,2})$", text) {
        let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?;
        return Some(date.and_time(NaiveTime::MIN));
    }

    let (_, year, month, day, hour, minute, second, fraction) = regex_captures!(
        r"^(\d{1,6})/(\d{1,2})/(\d{1,2})(?:[ T](\d{1,2}):(\d{1,2})(?::(\d{1,2})(?:\.(\d{1,3}))?)?)?$",
        text
    )?;

    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    let time = NaiveTime::from_hms_milli_opt(
        parse_or_zero(hour)?,
        parse_or_zero(minute)?,
        parse_or_zero(second)?,
        fraction_millis(fraction)?,
    )?;
    Some(date.and_time(time))
}

fn parse_or_zero(field: &str) -> Option<u32> {
    if field.is_empty() {
        Some(0)
    } else {
        field.parse().ok()
    }
}

/// `.5` is 500ms, `.05` is 50ms, `.005` is 5ms.
fn fraction_millis(fraction: &str) -> Option<u32> {
    if fraction.is_empty() {
        return Some(0);
    }
    let value: u32 = fraction.parse().ok()?;
    Some(value * 10u32.pow(3 - fraction.len() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use rstest::rstest;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap()
    }

    #[rstest]
    #[case::empty_variant(DateLike::Empty)]
    #[case::none(DateLike::from(None::<&str>))]
    #[case::empty_string(DateLike::from(""))]
    #[case::zero(DateLike::from(0i64))]
    fn empty_sources_are_rejected(#[case] source: DateLike) {
        assert_eq!(source.resolve_in(&Utc), Err(InstantError::Empty));
    }

    #[rstest]
    #[case::dashed_date("2018-01-30", naive(2018, 1, 30, 0, 0, 0, 0))]
    #[case::slashed_date("2018/01/30", naive(2018, 1, 30, 0, 0, 0, 0))]
    #[case::single_digit_fields("2018-1-3", naive(2018, 1, 3, 0, 0, 0, 0))]
    #[case::year_month("2018-02", naive(2018, 2, 1, 0, 0, 0, 0))]
    #[case::minutes("2018-12-10 18:31", naive(2018, 12, 10, 18, 31, 0, 0))]
    #[case::seconds("2018-12-10 18:31:37", naive(2018, 12, 10, 18, 31, 37, 0))]
    #[case::t_separator("2018-12-10T18:31:37", naive(2018, 12, 10, 18, 31, 37, 0))]
    #[case::millis("2018-12-10 18:31:37.250", naive(2018, 12, 10, 18, 31, 37, 250))]
    #[case::short_fraction("2018-12-10 18:31:37.5", naive(2018, 12, 10, 18, 31, 37, 500))]
    #[case::padded_whitespace("  2018-01-30  ", naive(2018, 1, 30, 0, 0, 0, 0))]
    fn wall_clock_strings_are_local(#[case] text: &str, #[case] expected: NaiveDateTime) {
        // The zone must not matter for wall-clock strings.
        let east = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(DateLike::from(text).resolve_in(&Utc).unwrap().naive(), expected);
        assert_eq!(DateLike::from(text).resolve_in(&east).unwrap().naive(), expected);
    }

    #[test]
    fn numeric_strings_are_epoch_millis() {
        let east = FixedOffset::east_opt(8 * 3600).unwrap();
        let instant = DateLike::from("1517241600000").resolve_in(&east).unwrap();
        assert_eq!(instant.naive(), naive(2018, 1, 30, 0, 0, 0, 0));
    }

    #[test]
    fn numeric_string_fraction_is_truncated() {
        let instant = DateLike::from("1500.9").resolve_in(&Utc).unwrap();
        assert_eq!(instant.naive(), naive(1970, 1, 1, 0, 0, 1, 500));
    }

    #[test]
    fn zero_as_text_is_the_epoch() {
        let instant = DateLike::from("0").resolve_in(&Utc).unwrap();
        assert_eq!(instant.naive(), naive(1970, 1, 1, 0, 0, 0, 0));
    }

    #[test]
    fn negative_numeric_text_is_not_epoch_millis() {
        // "-5" becomes "/5" after separator normalization.
        assert_eq!(
            DateLike::from("-5").resolve_in(&Utc),
            Err(InstantError::Unparseable("-5".to_string()))
        );
    }

    #[test]
    fn integer_millis_use_the_given_zone() {
        let west = FixedOffset::west_opt(5 * 3600).unwrap();
        let instant = DateLike::from(86_400_000i64).resolve_in(&west).unwrap();
        assert_eq!(instant.naive(), naive(1970, 1, 1, 19, 0, 0, 0));
    }

    #[rstest]
    #[case::one_second(-1000)]
    #[case::one_day(-86_400_000)]
    fn negative_integer_millis_are_unparseable(#[case] ms: i64) {
        assert_eq!(
            DateLike::from(ms).resolve_in(&Utc),
            Err(InstantError::Unparseable(ms.to_string()))
        );
    }

    #[test]
    fn epoch_millis_in_accepts_zero() {
        let instant = Instant::from_epoch_millis_in(0, &Utc).unwrap();
        assert_eq!(instant.naive(), naive(1970, 1, 1, 0, 0, 0, 0));
    }

    #[test]
    fn out_of_range_millis_are_rejected() {
        assert_eq!(
            DateLike::from(i64::MAX).resolve_in(&Utc),
            Err(InstantError::OutOfRange(i64::MAX))
        );
    }

    #[rstest]
    #[case::utc("2018-12-10T10:31:37Z")]
    #[case::positive_offset("2018-12-10T18:31:37+08:00")]
    #[case::negative_offset("2018-12-10T05:31:37-05:00")]
    fn rfc3339_is_converted_into_zone(#[case] text: &str) {
        let east = FixedOffset::east_opt(8 * 3600).unwrap();
        let instant = DateLike::from(text).resolve_in(&east).unwrap();
        assert_eq!(instant.naive(), naive(2018, 12, 10, 18, 31, 37, 0));
    }

    #[rstest]
    #[case::garbage("not a date")]
    #[case::month_out_of_range("2018-13-01")]
    #[case::day_out_of_range("2018-02-30")]
    #[case::hour_out_of_range("2018-02-01 24:00")]
    #[case::trailing_text("2018-02-01 soon")]
    fn unparseable_text_is_rejected(#[case] text: &str) {
        assert_eq!(
            DateLike::from(text).resolve_in(&Utc),
            Err(InstantError::Unparseable(text.to_string()))
        );
    }

    #[test]
    fn native_values_are_taken_as_is() {
        let dt = naive(2020, 7, 4, 9, 5, 3, 7);
        assert_eq!(DateLike::from(dt).resolve_in(&Utc).unwrap().naive(), dt);

        let date = NaiveDate::from_ymd_opt(2020, 7, 4).unwrap();
        assert_eq!(
            DateLike::from(date).resolve_in(&Utc).unwrap().naive(),
            naive(2020, 7, 4, 0, 0, 0, 0)
        );

        let east = FixedOffset::east_opt(3600).unwrap();
        let zoned = east.from_local_datetime(&dt).unwrap();
        assert_eq!(DateLike::from(zoned).resolve_in(&Utc).unwrap().naive(), dt);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 1)]
    #[case(3, 1)]
    #[case(4, 2)]
    #[case(6, 2)]
    #[case(7, 3)]
    #[case(9, 3)]
    #[case(10, 4)]
    #[case(12, 4)]
    fn quarter_follows_month(#[case] month: u32, #[case] quarter: u32) {
        let instant = Instant::new(naive(2021, month, 1, 0, 0, 0, 0));
        assert_eq!(instant.quarter(), quarter);
    }

    #[test]
    fn accessors_expose_fields() {
        let instant = Instant::new(naive(2021, 11, 28, 23, 59, 58, 999));
        assert_eq!(
            (
                instant.year(),
                instant.month(),
                instant.day(),
                instant.hour(),
                instant.minute(),
                instant.second(),
                instant.millisecond()
            ),
            (2021, 11, 28, 23, 59, 58, 999)
        );
    }
}
