use crate::util;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::time::SystemTime;

/// Decides whether the table published for `publish_date` still has to be
/// captured, given the last write time of the local store.
///
/// The publisher's date carries no time of day, so it is taken as 23:59:59 of
/// that day in `tz`. The fetch is skipped once the store was written at or
/// after that instant.
pub fn should_fetch(publish_date: &NaiveDate, local_last_modified: SystemTime, tz: &Tz) -> bool {
    let end_of_day = match util::end_of_day(publish_date, tz) {
        Some(instant) => instant,
        // The day has no 23:59:59 in `tz`; capture rather than risk a gap
        None => return true,
    };
    let local: DateTime<Utc> = local_last_modified.into();
    local < end_of_day
}
