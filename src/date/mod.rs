//! Date formatting and relative-time labels.

mod format;
mod instant;
mod relative;

pub use format::{DEFAULT_PATTERN, Formatter, format, format_instant};
pub use instant::{DateLike, Instant, InstantError};
pub use relative::{
    Bucket, CLOCK_ANCHOR, Clock, FixedClock, JUST_NOW_MS, Locale, ONE_DAY_MS, RelativeTime,
    SystemClock, THREE_DAYS_MS, TWO_DAYS_MS, seconds_to_clock, to_day_label, to_local_label,
};
