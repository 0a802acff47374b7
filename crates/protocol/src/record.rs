//! Match report - JSON written after a match for replays and tooling

use rand::Rng;
use serde::{Deserialize, Serialize};

use blockbattle_core::{HistoryRecord, Outcome, PlayerState, RoundProcessor};

use crate::error::ProtocolError;

/// One history snapshot as stored in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub round: u32,
    /// Move name, the legality note for illegal moves, or empty
    #[serde(rename = "move")]
    pub move_description: String,
    pub combo: u32,
    pub skips: u32,
    pub points: u32,
    pub next_piece_type: String,
    /// Visualizer field notation
    pub field: String,
}

impl From<&HistoryRecord> for HistoryEntry {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            round: record.round,
            move_description: record.move_description(),
            combo: record.combo,
            skips: record.skips,
            points: record.points,
            next_piece_type: record.next_piece.as_str().to_string(),
            field: record.field.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Winner,
    Draw,
    /// Stopped by a round limit before anyone lost
    Unfinished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub result: OutcomeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl From<Outcome> for OutcomeRecord {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Decided(winner) => Self {
                result: OutcomeKind::Winner,
                winner: Some(winner.as_str().to_string()),
            },
            Outcome::Draw => Self {
                result: OutcomeKind::Draw,
                winner: None,
            },
            Outcome::Undecided => Self {
                result: OutcomeKind::Unfinished,
                winner: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub name: String,
    pub row_points: u32,
    pub combo: u32,
    pub skips: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub history: Vec<HistoryEntry>,
}

impl From<&PlayerState> for PlayerReport {
    fn from(player: &PlayerState) -> Self {
        Self {
            name: player.id().as_str().to_string(),
            row_points: player.row_points(),
            combo: player.combo(),
            skips: player.skips(),
            warnings: player.warnings().iter().map(ToString::to_string).collect(),
            history: player.history().iter().map(HistoryEntry::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub rounds: u32,
    pub outcome: OutcomeRecord,
    pub players: Vec<PlayerReport>,
}

impl MatchReport {
    pub fn from_processor<R: Rng>(processor: &RoundProcessor<R>, seed: Option<u64>) -> Self {
        Self {
            seed,
            rounds: processor.round(),
            outcome: processor.outcome().into(),
            players: processor.players().iter().map(PlayerReport::from).collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }
}
