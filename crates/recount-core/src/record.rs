//! Terminal output records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One narrative for one (user, day) — the pipeline's unit of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeRecord {
  pub date:      NaiveDate,
  pub user_id:   String,
  pub narrative: String,
}
