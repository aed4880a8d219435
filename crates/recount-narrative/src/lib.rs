//! Narrative generation for recount.
//!
//! Converts one day bucket of canonical events into a single free-text
//! summary string. Pure synchronous; no I/O dependencies, no state shared
//! across buckets — buckets can be summarized in any order, or in parallel.
//!
//! # Quick start
//!
//! ```
//! use recount_narrative::summarize;
//!
//! // An empty bucket is a defined no-op.
//! assert_eq!(summarize(&[]), "");
//! ```

mod domain;
mod summarize;

pub use domain::domain_of;
pub use summarize::{narrate, summarize};
