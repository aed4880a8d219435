//! The user → role lookup, built once per run and read-only afterwards.

use std::collections::HashMap;

/// Role reported for users absent from the directory.
pub const UNKNOWN_ROLE: &str = "Unknown";

/// Mapping from bare user identifier to organizational role.
///
/// Built with last-occurrence-wins deduplication: when the directory holds
/// several entries for the same user, the one inserted last is kept. After
/// construction the map is only ever read, so sharing it across summarizer
/// tasks needs no synchronisation.
#[derive(Debug, Clone, Default)]
pub struct RoleMap {
  inner: HashMap<String, String>,
}

impl RoleMap {
  pub fn new() -> Self { Self::default() }

  /// Insert one directory entry. A later insertion for the same user
  /// overwrites the earlier one.
  pub fn insert(&mut self, user_id: String, role: String) {
    self.inner.insert(user_id, role);
  }

  /// Look up a user's role, defaulting to [`UNKNOWN_ROLE`] for users the
  /// directory does not know.
  pub fn role_of(&self, user_id: &str) -> &str {
    self
      .inner
      .get(user_id)
      .map(String::as_str)
      .unwrap_or(UNKNOWN_ROLE)
  }

  /// Number of distinct users with a known role.
  pub fn len(&self) -> usize { self.inner.len() }

  pub fn is_empty(&self) -> bool { self.inner.is_empty() }
}

impl FromIterator<(String, String)> for RoleMap {
  fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
    let mut map = Self::new();
    for (user_id, role) in iter {
      map.insert(user_id, role);
    }
    map
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
