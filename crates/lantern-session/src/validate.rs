//! Session staleness checks.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::record::SessionRecord;

/// Decide whether a retrieved record is unusable for this request.
///
/// A record is invalid when retrieval produced nothing, or when its last
/// activity lies further in the past than `lifetime` allows. A record
/// without an activity timestamp has never been persisted and is not
/// stale. Pure predicate, deterministic given `now`.
pub fn is_invalid(record: Option<&SessionRecord>, lifetime: Duration, now: DateTime<Utc>) -> bool {
    let Some(record) = record else {
        return true;
    };

    match record.last_activity {
        Some(last_activity) => last_activity < now.timestamp() - lifetime.as_secs() as i64,
        None => false,
    }
}
