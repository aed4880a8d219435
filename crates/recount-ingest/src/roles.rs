//! Role-directory loader.
//!
//! The role directory holds zero or more CSV exports of the user directory,
//! each with `user_id` and `Role` columns. All files are folded into one
//! [`RoleMap`] with last-occurrence-wins deduplication; files are visited in
//! lexicographic path order, so "last" is reproducible across platforms.

use std::{fs, path::Path};

use recount_core::role::RoleMap;
use tracing::{info, warn};

use crate::{
  error::{Error, Result},
  reader::parse_records,
  sources::find_column,
};

/// Fold one role file's contents into `map`. Later rows overwrite earlier
/// ones, within this file and across files already folded.
pub fn merge_role_file(
  input: &str,
  file: &str,
  map: &mut RoleMap,
) -> Result<()> {
  let mut rows = parse_records(input, file)?.into_iter();
  let header = rows.next().unwrap_or_default();

  let user_col = find_column(&header, "user_id", file)?;
  let role_col = find_column(&header, "role", file)?;
  let needed = 1 + user_col.max(role_col);

  for (index, row) in rows.enumerate() {
    if row.len() < needed {
      return Err(Error::ShortRecord {
        file: file.to_string(),
        index,
        expected: needed,
        got: row.len(),
      });
    }
    map.insert(row[user_col].clone(), row[role_col].clone());
  }
  Ok(())
}

/// Build the run's [`RoleMap`] from every `*.csv` file under `dir`.
///
/// A missing directory or an empty one is non-fatal: the run proceeds with
/// an empty map and every user reports as `"Unknown"`. A file that exists
/// but cannot be read or decoded is an error.
pub fn load_role_map(dir: &Path) -> Result<RoleMap> {
  let mut map = RoleMap::new();

  let entries = match fs::read_dir(dir) {
    Ok(entries) => entries,
    Err(_) => {
      warn!(dir = %dir.display(), "role directory missing; roles default to Unknown");
      return Ok(map);
    }
  };

  let mut paths: Vec<_> = entries
    .filter_map(|entry| entry.ok().map(|e| e.path()))
    .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
    .collect();
  if paths.is_empty() {
    warn!(dir = %dir.display(), "no role files found; roles default to Unknown");
    return Ok(map);
  }
  paths.sort();

  for path in paths {
    let file = path.display().to_string();
    let input = fs::read_to_string(&path).map_err(|source| Error::Io {
      file: file.clone(),
      source,
    })?;
    merge_role_file(&input, &file, &mut map)?;
  }

  info!(users = map.len(), "role directory loaded");
  Ok(map)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn folds_rows_last_wins() {
    let mut map = RoleMap::new();
    merge_role_file(
      "employee_name,user_id,Role\nAlice,u1,Salesman\nBob,u2,ITAdmin\n",
      "ldap-01.csv",
      &mut map,
    )
    .unwrap();
    merge_role_file(
      "employee_name,user_id,Role\nAlice,u1,Director\n",
      "ldap-02.csv",
      &mut map,
    )
    .unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map.role_of("u1"), "Director");
    assert_eq!(map.role_of("u2"), "ITAdmin");
  }

  #[test]
  fn header_names_are_case_insensitive() {
    let mut map = RoleMap::new();
    merge_role_file("USER_ID,role\nu1,Engineer\n", "ldap.csv", &mut map)
      .unwrap();
    assert_eq!(map.role_of("u1"), "Engineer");
  }

  #[test]
  fn missing_role_column_is_rejected() {
    let mut map = RoleMap::new();
    let r = merge_role_file("user_id,email\nu1,a@b\n", "ldap.csv", &mut map);
    assert!(
      matches!(r, Err(Error::MissingColumn { column, .. }) if column == "role")
    );
  }

  #[test]
  fn missing_directory_yields_empty_map() {
    let map = load_role_map(Path::new("/nonexistent/ldap")).unwrap();
    assert!(map.is_empty());
  }
}
