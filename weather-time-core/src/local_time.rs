use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::LookupError;

/// `YYYY-MM-DD HH:MM:SS` followed by the zone abbreviation and UTC offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z%z";

/// Build the time sentence for `resolved_name` at instant `now`.
pub fn describe_local_time(
    resolved_name: &str,
    timezone_id: &str,
    now: DateTime<Utc>,
) -> Result<String, LookupError> {
    let tz: Tz = timezone_id
        .parse()
        .map_err(|_| LookupError::InvalidTimezone(timezone_id.to_string()))?;

    let local = now.with_timezone(&tz);
    Ok(format!(
        "The current time in {resolved_name} is {}",
        local.format(TIMESTAMP_FORMAT)
    ))
}
