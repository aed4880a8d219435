//! The canonical activity event — the fundamental unit of the pipeline.
//!
//! Every raw log record, whatever its source, is normalized into an [`Event`]
//! exactly once. Events are never mutated after they enter the merge stage.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Activity kinds ──────────────────────────────────────────────────────────

/// The fixed set of activity kinds observed across the three log sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
  Logon,
  Logoff,
  DeviceConnect,
  DeviceDisconnect,
  Http,
}

impl ActivityType {
  /// The discriminant string used in diagnostics.
  /// Must match the `rename_all = "snake_case"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Logon => "logon",
      Self::Logoff => "logoff",
      Self::DeviceConnect => "device_connect",
      Self::DeviceDisconnect => "device_disconnect",
      Self::Http => "http",
    }
  }

  pub fn is_http(&self) -> bool { matches!(self, Self::Http) }
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// One normalized activity record.
///
/// The logs carry no timezone, so timestamps are naive; precision is to the
/// second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  pub timestamp: NaiveDateTime,
  /// The bare user identifier, with the domain prefix already stripped.
  pub user_id:   String,
  /// Organizational role from the role directory; `"Unknown"` if unmapped.
  pub role:      String,
  /// Host/machine identifier the event was observed on.
  pub pc:        String,
  pub activity:  ActivityType,
  /// Present only for [`ActivityType::Http`] events.
  pub url:       Option<String>,
}

// ─── User-field decoding ─────────────────────────────────────────────────────

/// Extract the bare user identifier from the `<domain>/<user>` field the raw
/// logs carry: the second `/`-separated component.
pub fn user_id_from_field(field: &str) -> Result<&str> {
  field
    .split('/')
    .nth(1)
    .ok_or_else(|| Error::MalformedUserField(field.to_string()))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
