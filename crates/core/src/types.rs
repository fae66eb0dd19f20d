//! Primitive aliases shared by every layer.

/// Row id (`BIGSERIAL`).
pub type DbId = i64;

/// Instant in UTC (`TIMESTAMPTZ`).
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar day without a time zone (`DATE`): rental periods, blocked dates.
pub type CalendarDate = chrono::NaiveDate;
