//! Raw log ingestion for recount.
//!
//! Pipeline:
//!   raw file contents
//!     └─ reader::parse_records()   → records of fields
//!          └─ sources::parse_*()   → normalized [`recount_core::event::Event`]s
//!               (role directory folded in via roles::load_role_map())
//!
//! The three event sources are required; the role directory is optional.
//! Normalization is strict where identity or ordering is at stake (user
//! field, timestamps) and lenient where the logs themselves are lenient
//! (unknown activity strings classify to the off/disconnect branch).

pub mod error;
mod reader;
pub mod roles;
pub mod sources;

pub use error::{Error, Result};
pub use roles::load_role_map;
pub use sources::{
  parse_auth, parse_device, parse_web, read_auth_events, read_device_events,
  read_web_events,
};
