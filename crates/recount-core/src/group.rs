//! Per-day partitioning of the merged stream.

use chrono::NaiveDate;

use crate::event::Event;

/// The ordered events for one (user, calendar day).
#[derive(Debug, Clone)]
pub struct DayBucket {
  pub user_id: String,
  pub date:    NaiveDate,
  pub events:  Vec<Event>,
}

/// Partition a merged, sorted stream into day buckets.
///
/// The input must already be ordered by `(user_id, timestamp)` — see
/// [`crate::merge::merge_events`] — so every bucket is a contiguous run and
/// one pass that cuts on key change suffices. Intra-bucket order is inherited
/// unchanged, no event lands in more than one bucket, and empty buckets are
/// never created. Buckets come out ordered by `(user_id, date)`.
pub fn group_by_day(events: Vec<Event>) -> Vec<DayBucket> {
  let mut buckets: Vec<DayBucket> = Vec::new();
  for event in events {
    let date = event.timestamp.date();
    match buckets.last_mut() {
      Some(bucket)
        if bucket.user_id == event.user_id && bucket.date == date =>
      {
        bucket.events.push(event);
      }
      _ => buckets.push(DayBucket {
        user_id: event.user_id.clone(),
        date,
        events: vec![event],
      }),
    }
  }
  buckets
}

// ─── Tests ───────────────────────────────────────────────────────────────────
