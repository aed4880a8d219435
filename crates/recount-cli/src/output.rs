//! Output CSV writer.
//!
//! Narratives contain commas by construction, so fields are quoted when they
//! hold a comma, quote, or newline, with embedded quotes doubled.

use std::{borrow::Cow, fs, io::{self, BufWriter, Write}, path::Path};

use recount_core::record::NarrativeRecord;

/// Write the run's narratives to `path`, creating parent directories as
/// needed.
pub fn write_narratives(
  path: &Path,
  records: &[NarrativeRecord],
) -> io::Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  let mut out = BufWriter::new(fs::File::create(path)?);
  write_to(&mut out, records)?;
  out.flush()
}

/// Write `records` as CSV with a `date,user,narrative` header.
pub fn write_to<W: Write>(
  mut out: W,
  records: &[NarrativeRecord],
) -> io::Result<()> {
  writeln!(out, "date,user,narrative")?;
  for record in records {
    writeln!(
      out,
      "{},{},{}",
      record.date.format("%Y-%m-%d"),
      escape(&record.user_id),
      escape(&record.narrative),
    )?;
  }
  Ok(())
}

fn escape(field: &str) -> Cow<'_, str> {
  if field.contains([',', '"', '\n', '\r']) {
    Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
  } else {
    Cow::Borrowed(field)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
