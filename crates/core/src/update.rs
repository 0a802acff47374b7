//! Round update payload sent to each bot before it picks its moves
//!
//! Plain data; turning it into text lines is the protocol layer's job.

use crate::field::RenderMode;
use crate::player::PlayerState;
use crate::types::{PieceKind, PlayerId};

/// Counters and field of one side, as one bot sees them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideUpdate {
    pub player: PlayerId,
    pub row_points: u32,
    pub combo: u32,
    pub skips: u32,
    /// Field in compact notation
    pub field: String,
}

impl SideUpdate {
    pub fn from_player(player: &PlayerState) -> Self {
        Self {
            player: player.id(),
            row_points: player.row_points(),
            combo: player.combo(),
            skips: player.skips(),
            field: player.field().render(RenderMode::Compact),
        }
    }
}

/// Everything a bot is told at the start of a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundUpdate {
    pub round: u32,
    pub this_piece: PieceKind,
    pub next_piece: PieceKind,
    /// Spawn anchor of this round's piece
    pub this_piece_position: (i32, i32),
    pub own: SideUpdate,
    pub opponent: SideUpdate,
}

impl RoundUpdate {
    /// Anchor formatted as `x,y`
    pub fn position_string(&self) -> String {
        let (x, y) = self.this_piece_position;
        format!("{x},{y}")
    }
}
