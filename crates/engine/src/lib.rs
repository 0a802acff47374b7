//! Match engine - runs whole matches on top of the round processor
//!
//! - [`config`]: match settings from defaults, environment and scripts
//! - [`runner`]: plays rounds to the end and summarizes the result
//! - [`script`]: a [`MoveSource`](blockbattle_core::MoveSource) that replays canned replies

pub mod config;
pub mod runner;
pub mod script;

pub use blockbattle_types as types;

pub use config::MatchConfig;
pub use runner::{MatchRunner, MatchSummary, PlayerSummary};
pub use script::ScriptedSource;
