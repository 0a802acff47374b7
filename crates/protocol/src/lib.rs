//! Protocol module - text and JSON formats around the referee
//!
//! The core crate only produces plain data. This crate turns it into what
//! leaves the process:
//!
//! - [`lines`]: `update ...` lines sent to bots each round
//! - [`record`]: the JSON match report (outcome, counters, full history)
//! - [`script`]: JSON match scripts used to replay canned bot replies

mod error;
pub mod lines;
pub mod record;
pub mod script;

pub use blockbattle_types as types;

pub use error::ProtocolError;
pub use lines::{update_lines, UpdateLine, UpdateTarget};
pub use record::{HistoryEntry, MatchReport, OutcomeKind, OutcomeRecord, PlayerReport};
pub use script::MatchScript;
