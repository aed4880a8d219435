//! Chronological merge of the per-source event sequences.

use crate::event::Event;

/// Union the normalized per-source sequences into one stream, ordered by
/// `(user_id, timestamp)`.
///
/// The sort is stable: events with an identical `(user_id, timestamp)` key
/// keep their relative order from the concatenated input. Callers therefore
/// control the tie-break through the order in which they pass `sources` —
/// that ordering is part of the pipeline's contract, not an accident.
pub fn merge_events(sources: Vec<Vec<Event>>) -> Vec<Event> {
  let mut merged: Vec<Event> = sources.into_iter().flatten().collect();
  merged.sort_by(|a, b| {
    a.user_id
      .cmp(&b.user_id)
      .then_with(|| a.timestamp.cmp(&b.timestamp))
  });
  merged
}

// ─── Tests ───────────────────────────────────────────────────────────────────
