//! The narrative summarizer — ordered events in, one prose string out.
//!
//! A single-pass, stateful reduction with two states: scanning, where each
//! non-web event emits a discrete sentence, and buffering, where consecutive
//! web events accumulate into a [`WebRun`] that collapses into one aggregate
//! sentence on the first non-web event or at end of input.

use chrono::NaiveDateTime;
use recount_core::{
  event::{ActivityType, Event},
  group::DayBucket,
  record::NarrativeRecord,
};

use crate::domain::domain_of;

/// How many top domains a web-run sentence lists.
const TOP_DOMAINS: usize = 3;

// ─── Web-run accumulator ─────────────────────────────────────────────────────

/// Accumulated state for one maximal run of contiguous web events.
///
/// Domain counts are kept in first-occurrence order, so equal counts list
/// deterministically. The run is consumed on flush and replaced with a fresh
/// default, never mutated back to empty.
#[derive(Default)]
struct WebRun {
  start:   Option<NaiveDateTime>,
  end:     Option<NaiveDateTime>,
  total:   usize,
  domains: Vec<(String, usize)>,
}

impl WebRun {
  fn push(&mut self, event: &Event) {
    if self.start.is_none() {
      self.start = Some(event.timestamp);
    }
    self.end = Some(event.timestamp);
    self.total += 1;

    let domain = domain_of(event.url.as_deref().unwrap_or_default());
    match self.domains.iter().position(|(d, _)| d == domain) {
      Some(i) => self.domains[i].1 += 1,
      None => self.domains.push((domain.to_string(), 1)),
    }
  }

  /// Consume the run and render its aggregate sentence, or `None` for an
  /// empty run.
  fn flush(self) -> Option<String> {
    let start = self.start?;
    let end = self.end?;

    let mut ranked = self.domains;
    // Stable sort: ties keep first-occurrence order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let listed = ranked
      .iter()
      .take(TOP_DOMAINS)
      .map(|(domain, count)| format!("{domain} ({count} times)"))
      .collect::<Vec<_>>()
      .join(", ");

    Some(format!(
      "Between {} and {}, visited {} websites, including {}.",
      start.format("%H:%M:%S"),
      end.format("%H:%M:%S"),
      self.total,
      listed,
    ))
  }
}

// ─── Header helpers ──────────────────────────────────────────────────────────

/// The most frequent `pc` value in `events`.
///
/// Ties break to the first value reaching the winning count in bucket order:
/// the running maximum only moves when strictly exceeded.
fn modal_pc(events: &[Event]) -> &str {
  let mut counts: Vec<(&str, usize)> = Vec::new();
  let mut best = "";
  let mut best_count = 0;

  for event in events {
    let count = match counts.iter().position(|(pc, _)| *pc == event.pc) {
      Some(i) => {
        counts[i].1 += 1;
        counts[i].1
      }
      None => {
        counts.push((event.pc.as_str(), 1));
        1
      }
    };
    if count > best_count {
      best = event.pc.as_str();
      best_count = count;
    }
  }

  best
}

// ─── Summarizer ──────────────────────────────────────────────────────────────

/// Render one day bucket of ordered events as a single narrative string.
///
/// Pure: the output is a function of the event sequence alone, so repeated
/// invocations on the same bucket are byte-identical. An empty bucket yields
/// the empty string.
pub fn summarize(events: &[Event]) -> String {
  let Some(first) = events.first() else {
    return String::new();
  };

  let mut sentences = vec![format!(
    "User {} (Role: {}) on {}:",
    first.user_id,
    first.role,
    modal_pc(events),
  )];

  let mut run = WebRun::default();
  for event in events {
    let time = event.timestamp.format("%H:%M:%S");
    let sentence = match event.activity {
      ActivityType::Http => {
        run.push(event);
        continue;
      }
      ActivityType::Logon => format!("Logged on at {time}."),
      ActivityType::Logoff => format!("Logged off at {time}."),
      ActivityType::DeviceConnect => {
        format!("Connected a USB device at {time}.")
      }
      ActivityType::DeviceDisconnect => {
        format!("Disconnected a USB device at {time}.")
      }
    };

    // A non-web event closes any open web run before its own sentence.
    if let Some(flushed) = std::mem::take(&mut run).flush() {
      sentences.push(flushed);
    }
    sentences.push(sentence);
  }

  // A run still open at end of input flushes before termination.
  if let Some(flushed) = run.flush() {
    sentences.push(flushed);
  }

  sentences.join(" ")
}

/// Summarize a bucket into its terminal output record.
pub fn narrate(bucket: &DayBucket) -> NarrativeRecord {
  NarrativeRecord {
    date:      bucket.date,
    user_id:   bucket.user_id.clone(),
    narrative: summarize(&bucket.events),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn at(hms: (u32, u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2010, 1, 4)
      .unwrap()
      .and_hms_opt(hms.0, hms.1, hms.2)
      .unwrap()
  }

  fn discrete(
    hms: (u32, u32, u32),
    activity: ActivityType,
    pc: &str,
  ) -> Event {
    Event {
      timestamp: at(hms),
      user_id: "u123".to_string(),
      role: "ITAdmin".to_string(),
      pc: pc.to_string(),
      activity,
      url: None,
    }
  }

  fn web(hms: (u32, u32, u32), url: &str) -> Event {
    Event {
      timestamp: at(hms),
      user_id: "u123".to_string(),
      role: "ITAdmin".to_string(),
      pc: "PC-01".to_string(),
      activity: ActivityType::Http,
      url: Some(url.to_string()),
    }
  }

  // ── Discrete sentences ──────────────────────────────────────────────────

  #[test]
  fn lone_logon_event() {
    let events = [discrete((8, 0, 0), ActivityType::Logon, "PC-01")];
    assert_eq!(
      summarize(&events),
      "User u123 (Role: ITAdmin) on PC-01: Logged on at 08:00:00."
    );
  }

  #[test]
  fn device_sentences() {
    let events = [
      discrete((9, 15, 0), ActivityType::DeviceConnect, "PC-01"),
      discrete((9, 45, 30), ActivityType::DeviceDisconnect, "PC-01"),
    ];
    assert_eq!(
      summarize(&events),
      "User u123 (Role: ITAdmin) on PC-01: Connected a USB device at \
       09:15:00. Disconnected a USB device at 09:45:30."
    );
  }

  // ── Web-run flushes ─────────────────────────────────────────────────────

  #[test]
  fn buffer_flush_counts_and_ranks_domains() {
    let events = [
      web((9, 0, 0), "http://example.com/a"),
      web((9, 5, 0), "http://test.org/b"),
      web((9, 10, 0), "http://example.com/c"),
    ];
    assert_eq!(
      summarize(&events),
      "User u123 (Role: ITAdmin) on PC-01: Between 09:00:00 and 09:10:00, \
       visited 3 websites, including example.com (2 times), test.org (1 \
       times)."
    );
  }

  #[test]
  fn top_domains_capped_at_three() {
    let events = [
      web((9, 0, 0), "http://a.com/"),
      web((9, 1, 0), "http://a.com/"),
      web((9, 2, 0), "http://b.com/"),
      web((9, 3, 0), "http://b.com/"),
      web((9, 4, 0), "http://c.com/"),
      web((9, 5, 0), "http://d.com/"),
    ];
    let narrative = summarize(&events);
    assert!(narrative.contains(
      "including a.com (2 times), b.com (2 times), c.com (1 times)."
    ));
    assert!(!narrative.contains("d.com"));
  }

  #[test]
  fn domain_ties_list_in_first_occurrence_order() {
    let events = [
      web((9, 0, 0), "http://beta.net/"),
      web((9, 1, 0), "http://alpha.net/"),
      web((9, 2, 0), "http://beta.net/"),
      web((9, 3, 0), "http://alpha.net/"),
    ];
    let narrative = summarize(&events);
    assert!(
      narrative.contains("beta.net (2 times), alpha.net (2 times)"),
      "tie must keep first-occurrence order: {narrative}"
    );
  }

  #[test]
  fn interleaving_produces_three_sentences_after_header() {
    let events = [
      discrete((8, 0, 0), ActivityType::Logon, "PC-01"),
      web((8, 1, 0), "http://example.com/"),
      web((8, 2, 0), "http://example.com/x"),
      discrete((8, 10, 0), ActivityType::Logoff, "PC-01"),
    ];
    assert_eq!(
      summarize(&events),
      "User u123 (Role: ITAdmin) on PC-01: Logged on at 08:00:00. Between \
       08:01:00 and 08:02:00, visited 2 websites, including example.com (2 \
       times). Logged off at 08:10:00."
    );
  }

  #[test]
  fn two_web_runs_flush_separately() {
    let events = [
      web((8, 0, 0), "http://a.com/"),
      discrete((9, 0, 0), ActivityType::Logon, "PC-01"),
      web((10, 0, 0), "http://b.com/"),
    ];
    let narrative = summarize(&events);
    assert_eq!(narrative.matches("Between").count(), 2);
    assert!(narrative.contains(
      "Between 08:00:00 and 08:00:00, visited 1 websites, including a.com \
       (1 times). Logged on at 09:00:00."
    ));
  }

  // ── Header ──────────────────────────────────────────────────────────────

  #[test]
  fn header_uses_modal_pc() {
    let events = [
      discrete((8, 0, 0), ActivityType::Logon, "PC-02"),
      discrete((9, 0, 0), ActivityType::Logon, "PC-01"),
      discrete((10, 0, 0), ActivityType::Logoff, "PC-01"),
    ];
    assert!(summarize(&events).starts_with("User u123 (Role: ITAdmin) on PC-01:"));
  }

  #[test]
  fn modal_pc_tie_breaks_to_first_reaching_max() {
    // A and B both end on 2; B reaches 2 first.
    let events = [
      discrete((8, 0, 0), ActivityType::Logon, "A"),
      discrete((9, 0, 0), ActivityType::Logon, "B"),
      discrete((10, 0, 0), ActivityType::Logon, "B"),
      discrete((11, 0, 0), ActivityType::Logoff, "A"),
    ];
    assert_eq!(modal_pc(&events), "B");
  }

  #[test]
  fn role_comes_from_first_event() {
    let mut events = vec![
      discrete((8, 0, 0), ActivityType::Logon, "PC-01"),
      discrete((9, 0, 0), ActivityType::Logoff, "PC-01"),
    ];
    events[0].role = "Unknown".to_string();
    assert!(summarize(&events).starts_with("User u123 (Role: Unknown) on"));
  }

  // ── Edges ───────────────────────────────────────────────────────────────

  #[test]
  fn empty_bucket_is_empty_string() {
    assert_eq!(summarize(&[]), "");
  }

  #[test]
  fn all_web_bucket_is_header_plus_one_flush() {
    let events = [
      web((9, 0, 0), "http://example.com/"),
      web((9, 30, 0), "http://example.com/x"),
    ];
    assert_eq!(
      summarize(&events),
      "User u123 (Role: ITAdmin) on PC-01: Between 09:00:00 and 09:30:00, \
       visited 2 websites, including example.com (2 times)."
    );
  }

  #[test]
  fn summarization_is_deterministic() {
    let events = [
      discrete((8, 0, 0), ActivityType::Logon, "PC-01"),
      web((8, 1, 0), "http://example.com/"),
      web((8, 2, 0), "http://test.org/"),
      discrete((17, 0, 0), ActivityType::Logoff, "PC-01"),
    ];
    let first = summarize(&events);
    for _ in 0..10 {
      assert_eq!(summarize(&events), first);
    }
  }

  #[test]
  fn schemeless_url_still_counts() {
    let events = [web((9, 0, 0), "intranet.local/wiki")];
    assert!(summarize(&events).contains("intranet.local (1 times)"));
  }

  // ── narrate ─────────────────────────────────────────────────────────────

  #[test]
  fn narrate_carries_bucket_key() {
    let bucket = DayBucket {
      user_id: "u123".to_string(),
      date:    NaiveDate::from_ymd_opt(2010, 1, 4).unwrap(),
      events:  vec![discrete((8, 0, 0), ActivityType::Logon, "PC-01")],
    };
    let record = narrate(&bucket);
    assert_eq!(record.user_id, "u123");
    assert_eq!(record.date.to_string(), "2010-01-04");
    assert!(record.narrative.ends_with("Logged on at 08:00:00."));
  }
}
