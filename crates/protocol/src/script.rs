//! Match scripts - canned bot replies for offline matches
//!
//! ```json
//! {
//!   "seed": 7,
//!   "players": [
//!     ["left,left,drop", "turnright,drop"],
//!     ["drop", "right,right,drop"]
//!   ]
//! }
//! ```
//!
//! Entry `n` of a player's list is the reply for round `n + 1`.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::types::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchScript {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_width: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_height: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rounds: Option<u32>,
    pub players: Vec<Vec<String>>,
}

impl MatchScript {
    /// Parse and validate a script
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        let script: MatchScript = serde_json::from_str(json)?;
        if script.players.len() != PlayerId::ALL.len() {
            return Err(ProtocolError::PlayerCount(script.players.len()));
        }
        Ok(script)
    }

    /// Reply of `player` for `round` (1-based); empty once the script runs out
    pub fn reply(&self, player: PlayerId, round: u32) -> &str {
        let Some(index) = (round as usize).checked_sub(1) else {
            return "";
        };
        self.players
            .get(player.index())
            .and_then(|rounds| rounds.get(index))
            .map_or("", String::as_str)
    }

    /// Rounds covered by the longest reply list
    pub fn len(&self) -> usize {
        self.players.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
