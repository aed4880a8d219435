//! Per-source readers and normalization into canonical events.
//!
//! Each source gets the same treatment: decode records, resolve columns,
//! then per row — parse the timestamp, strip the domain from the user
//! field, classify the activity, and left-join the role map (unmatched
//! users become `"Unknown"`; the join never drops a row).

use std::{fs, path::Path};

use chrono::NaiveDateTime;
use recount_core::{
  event::{ActivityType, Event, user_id_from_field},
  role::RoleMap,
};

use crate::{
  error::{Error, Result},
  reader::parse_records,
};

/// Accepted timestamp formats, tried in order: the upstream log format
/// first, ISO as a fallback.
const TIMESTAMP_FORMATS: &[&str] = &["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

// ─── Shared helpers ──────────────────────────────────────────────────────────

fn parse_timestamp(value: &str) -> recount_core::Result<NaiveDateTime> {
  for format in TIMESTAMP_FORMATS {
    if let Ok(ts) = NaiveDateTime::parse_from_str(value.trim(), format) {
      return Ok(ts);
    }
  }
  Err(recount_core::Error::TimestampParse(value.to_string()))
}

fn read_source(path: &Path) -> Result<String> {
  if !path.is_file() {
    return Err(Error::MissingSource(path.to_path_buf()));
  }
  fs::read_to_string(path).map_err(|source| Error::Io {
    file: path.display().to_string(),
    source,
  })
}

fn file_label(path: &Path) -> String {
  path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| path.display().to_string())
}

pub(crate) fn find_column(
  header: &[String],
  name: &'static str,
  file: &str,
) -> Result<usize> {
  header
    .iter()
    .position(|h| h.trim().eq_ignore_ascii_case(name))
    .ok_or(Error::MissingColumn {
      file:   file.to_string(),
      column: name,
    })
}

// ─── Header-carrying sources (logon.csv, device.csv) ─────────────────────────

fn parse_with_header(
  input: &str,
  file: &str,
  roles: &RoleMap,
  classify: impl Fn(&str) -> ActivityType,
) -> Result<Vec<Event>> {
  let mut rows = parse_records(input, file)?.into_iter();
  let header = rows.next().unwrap_or_default();

  let date_col = find_column(&header, "date", file)?;
  let user_col = find_column(&header, "user", file)?;
  let pc_col = find_column(&header, "pc", file)?;
  let activity_col = find_column(&header, "activity", file)?;
  let needed = 1 + date_col.max(user_col).max(pc_col).max(activity_col);

  let mut events = Vec::new();
  for (index, row) in rows.enumerate() {
    if row.len() < needed {
      return Err(Error::ShortRecord {
        file: file.to_string(),
        index,
        expected: needed,
        got: row.len(),
      });
    }
    let user_id = user_id_from_field(&row[user_col])?;
    events.push(Event {
      timestamp: parse_timestamp(&row[date_col])?,
      user_id:   user_id.to_string(),
      role:      roles.role_of(user_id).to_string(),
      pc:        row[pc_col].clone(),
      activity:  classify(&row[activity_col]),
      url:       None,
    });
  }
  Ok(events)
}

/// Normalize raw authentication log contents.
/// `"Logon"` maps to [`ActivityType::Logon`]; everything else is a logoff.
pub fn parse_auth(
  input: &str,
  file: &str,
  roles: &RoleMap,
) -> Result<Vec<Event>> {
  parse_with_header(input, file, roles, |activity| {
    if activity == "Logon" {
      ActivityType::Logon
    } else {
      ActivityType::Logoff
    }
  })
}

/// Normalize raw removable-device log contents.
/// `"Connect"` maps to [`ActivityType::DeviceConnect`]; everything else is a
/// disconnect.
pub fn parse_device(
  input: &str,
  file: &str,
  roles: &RoleMap,
) -> Result<Vec<Event>> {
  parse_with_header(input, file, roles, |activity| {
    if activity == "Connect" {
      ActivityType::DeviceConnect
    } else {
      ActivityType::DeviceDisconnect
    }
  })
}

// ─── Header-less web source (http.csv) ───────────────────────────────────────

// http.csv carries no header row; positional columns are
// id, date, user, pc, url, content.
const WEB_DATE: usize = 1;
const WEB_USER: usize = 2;
const WEB_PC: usize = 3;
const WEB_URL: usize = 4;

/// Normalize raw web log contents. Every record is an
/// [`ActivityType::Http`] event carrying its URL.
pub fn parse_web(
  input: &str,
  file: &str,
  roles: &RoleMap,
) -> Result<Vec<Event>> {
  let records = parse_records(input, file)?;

  let mut events = Vec::new();
  for (index, row) in records.into_iter().enumerate() {
    if row.len() <= WEB_URL {
      return Err(Error::ShortRecord {
        file: file.to_string(),
        index,
        expected: WEB_URL + 1,
        got: row.len(),
      });
    }
    let user_id = user_id_from_field(&row[WEB_USER])?;
    events.push(Event {
      timestamp: parse_timestamp(&row[WEB_DATE])?,
      user_id:   user_id.to_string(),
      role:      roles.role_of(user_id).to_string(),
      pc:        row[WEB_PC].clone(),
      activity:  ActivityType::Http,
      url:       Some(row[WEB_URL].clone()),
    });
  }
  Ok(events)
}

// ─── File wrappers ───────────────────────────────────────────────────────────

/// Read and normalize the authentication log at `path`.
pub fn read_auth_events(path: &Path, roles: &RoleMap) -> Result<Vec<Event>> {
  parse_auth(&read_source(path)?, &file_label(path), roles)
}

/// Read and normalize the removable-device log at `path`.
pub fn read_device_events(path: &Path, roles: &RoleMap) -> Result<Vec<Event>> {
  parse_device(&read_source(path)?, &file_label(path), roles)
}

/// Read and normalize the web log at `path`.
pub fn read_web_events(path: &Path, roles: &RoleMap) -> Result<Vec<Event>> {
  parse_web(&read_source(path)?, &file_label(path), roles)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
