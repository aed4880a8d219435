//! Minimal quote-aware CSV record reader.
//!
//! The log exports are plain comma-separated text: fields separated by `,`,
//! records by LF or CRLF, with optional `"`-quoted fields that may contain
//! separators, newlines, and doubled-quote escapes (`""` → `"`). That is the
//! whole grammar; anything fancier (comments, alternate delimiters) does not
//! occur in these sources.

use crate::error::{Error, Result};

/// Parse `input` into records of fields.
///
/// Blank lines are skipped. A quote opened but never closed by end of input
/// is an [`Error::UnterminatedQuote`]; `file` only labels that error.
pub(crate) fn parse_records(
  input: &str,
  file: &str,
) -> Result<Vec<Vec<String>>> {
  let mut records: Vec<Vec<String>> = Vec::new();
  let mut record: Vec<String> = Vec::new();
  let mut field = String::new();
  let mut in_quotes = false;

  let mut chars = input.chars().peekable();
  while let Some(c) = chars.next() {
    if in_quotes {
      if c == '"' {
        if chars.peek() == Some(&'"') {
          chars.next();
          field.push('"');
        } else {
          in_quotes = false;
        }
      } else {
        field.push(c);
      }
      continue;
    }

    match c {
      '"' if field.is_empty() => in_quotes = true,
      ',' => record.push(std::mem::take(&mut field)),
      '\r' => {} // CRLF: the LF closes the record
      '\n' => {
        record.push(std::mem::take(&mut field));
        if record.len() == 1 && record[0].is_empty() {
          record.clear(); // blank line
        } else {
          records.push(std::mem::take(&mut record));
        }
      }
      _ => field.push(c),
    }
  }

  if in_quotes {
    return Err(Error::UnterminatedQuote {
      file: file.to_string(),
    });
  }

  // Final record without a trailing newline.
  if !field.is_empty() || !record.is_empty() {
    record.push(field);
    records.push(record);
  }

  Ok(records)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
