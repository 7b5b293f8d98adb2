//! Offset resolver - timezone id to whole-hour UTC offset at an instant
//!
//! Delegates timezone rules to chrono-tz and rounds the resulting offset to
//! the nearest whole hour. Sub-hour offsets (the 30/45-minute zones such as
//! Asia/Kolkata or Asia/Kathmandu) are rounded away; this is a known
//! approximation of the dial geometry, which works in 15-degree hour steps.

use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;

/// Error type for offset resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OffsetError {
    /// The timezone identifier is not a recognized IANA name
    InvalidTimezone(String),
}

impl std::fmt::Display for OffsetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffsetError::InvalidTimezone(id) => write!(f, "Invalid timezone: {}", id),
        }
    }
}

impl std::error::Error for OffsetError {}

/// Validate a timezone identifier, returning the parsed [`Tz`]
///
/// Callers accepting user-, link-, or store-supplied identifiers must
/// validate through here before trusting them.
pub fn validate(timezone_id: &str) -> Result<Tz, OffsetError> {
    timezone_id
        .parse::<Tz>()
        .map_err(|_| OffsetError::InvalidTimezone(timezone_id.to_string()))
}

/// Signed whole-hour UTC offset of `timezone_id` at `instant`
///
/// DST is accounted for because the offset is taken from the zone's rules at
/// the given instant; callers re-resolve on every geometry pass rather than
/// caching, so a DST boundary crossing between ticks is picked up.
pub fn resolve_offset_hours(
    timezone_id: &str,
    instant: DateTime<Utc>,
) -> Result<i32, OffsetError> {
    Ok(offset_hours(validate(timezone_id)?, instant))
}

/// Whole-hour offset for an already-validated zone
pub fn offset_hours(tz: Tz, instant: DateTime<Utc>) -> i32 {
    let local = instant.with_timezone(&tz);
    let offset_seconds = local.offset().fix().local_minus_utc();
    (f64::from(offset_seconds) / 3600.0).round() as i32
}
