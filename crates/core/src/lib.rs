//! Core referee logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the two-player block battle: the field,
//! piece movement, move parsing, scoring and the round state machine.
//! It does no I/O; bots are reached through the [`MoveSource`] trait and
//! randomness is injected as a `rand::Rng`.
//!
//! - **Deterministic**: same seed and same replies replay the same match
//! - **Testable**: `StepRng` pins every piece and garbage hole in tests
//! - **Forgiving**: bad bot input becomes warnings and move notes, never errors
//!
//! # Module Structure
//!
//! - [`field`]: the grid, row clears, garbage and solid rows, rendering
//! - [`shape`]: the active piece and its movement/rotation rules
//! - [`moves`]: move parsing, legality notes, engine warnings
//! - [`rng`]: uniform piece draws with one-piece look-ahead
//! - [`scoring`]: round points, combos, skips, garbage conversion
//! - [`player`]: per-seat counters, flags and history
//! - [`processor`]: the round state machine and match outcome
//! - [`update`]: the per-round payload each bot receives
//!
//! # Example
//!
//! ```
//! use blockbattle_core::{Outcome, RoundProcessor, RoundUpdate};
//! use blockbattle_core::types::PlayerId;
//!
//! let mut referee = RoundProcessor::seeded(10, 20, 42).unwrap();
//! let mut bots = |_: PlayerId, _: &RoundUpdate| "drop".to_string();
//!
//! referee.play_round(&mut bots);
//! assert_eq!(referee.round(), 1);
//! assert_eq!(referee.outcome(), Outcome::Undecided);
//! ```

mod error;
pub mod field;
pub mod moves;
pub mod player;
pub mod processor;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod update;

pub use blockbattle_types as types;

// Re-export commonly used types for convenience
pub use error::CoreError;
pub use field::{Field, RenderMode};
pub use moves::{parse_moves, EngineWarning, Move, MoveList, MoveNote};
pub use player::{HistoryRecord, PlayerState};
pub use processor::{MoveSource, Outcome, RoundPhase, RoundProcessor};
pub use rng::PieceQueue;
pub use scoring::{score_round, RoundStats, ScoreResult};
pub use shape::Shape;
pub use update::{RoundUpdate, SideUpdate};
