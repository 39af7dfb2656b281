//! Relative time formatting for feed and beacon timestamps
//!
//! Report and beacon timestamps are rendered as coarse relative time
//! ("2m ago") rather than wall-clock strings, consistent across all
//! dashboard views.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 3600;
const DAY: i64 = 86400;

/// Format a past timestamp relative to `now`.
///
/// - `just now` for anything under a minute (including clock skew into
///   the future)
/// - `Xm ago` under an hour
/// - `Xh ago` under a day
/// - `Xd ago` otherwise
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use glimpse_common::relative_time::format_relative;
///
/// let now = Utc::now();
/// assert_eq!(format_relative(now, now), "just now");
/// assert_eq!(format_relative(now - Duration::minutes(2), now), "2m ago");
/// assert_eq!(format_relative(now - Duration::hours(3), now), "3h ago");
/// assert_eq!(format_relative(now - Duration::days(5), now), "5d ago");
/// ```
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - then).num_seconds();

    if elapsed < MINUTE {
        "just now".to_string()
    } else if elapsed < HOUR {
        format!("{}m ago", elapsed / MINUTE)
    } else if elapsed < DAY {
        format!("{}h ago", elapsed / HOUR)
    } else {
        format!("{}d ago", elapsed / DAY)
    }
}

/// Format a past timestamp relative to the current wall clock
pub fn format_relative_now(then: DateTime<Utc>) -> String {
    format_relative(then, Utc::now())
}
