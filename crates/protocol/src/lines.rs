//! Engine-to-bot update lines
//!
//! Each round a bot receives a block of text lines before it is asked for
//! moves:
//!
//! ```text
//! update game round 3
//! update game this_piece_type T
//! update game next_piece_type I
//! update game this_piece_position 3,-1
//! update player1 row_points 4
//! update player1 combo 0
//! update player1 skips 0
//! update player1 field 0,0,0,1,1,1,0,0,0,0;...
//! update player2 field 0,0,0,1,1,1,0,0,0,0;...
//! update player2 row_points 0
//! update player2 combo 0
//! update player2 skips 0
//! ```

use std::fmt;

use blockbattle_core::{RoundUpdate, SideUpdate};

use crate::types::PlayerId;

/// Who an update line is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateTarget {
    Game,
    Player(PlayerId),
}

impl UpdateTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateTarget::Game => "game",
            UpdateTarget::Player(id) => id.as_str(),
        }
    }
}

/// One `update <target> <key> <value>` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateLine {
    pub target: UpdateTarget,
    pub key: &'static str,
    pub value: String,
}

impl UpdateLine {
    fn game(key: &'static str, value: impl ToString) -> Self {
        Self {
            target: UpdateTarget::Game,
            key,
            value: value.to_string(),
        }
    }

    fn player(id: PlayerId, key: &'static str, value: impl ToString) -> Self {
        Self {
            target: UpdateTarget::Player(id),
            key,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for UpdateLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "update {} {} {}", self.target.as_str(), self.key, self.value)
    }
}

fn counters(side: &SideUpdate) -> [UpdateLine; 3] {
    [
        UpdateLine::player(side.player, "row_points", side.row_points),
        UpdateLine::player(side.player, "combo", side.combo),
        UpdateLine::player(side.player, "skips", side.skips),
    ]
}

/// All lines a bot receives for one round, in sending order
///
/// Own counters come before the own field; the opponent's field comes
/// before its counters.
pub fn update_lines(update: &RoundUpdate) -> Vec<UpdateLine> {
    let mut lines = Vec::with_capacity(12);

    lines.push(UpdateLine::game("round", update.round));
    lines.push(UpdateLine::game("this_piece_type", update.this_piece));
    lines.push(UpdateLine::game("next_piece_type", update.next_piece));
    lines.push(UpdateLine::game(
        "this_piece_position",
        update.position_string(),
    ));

    lines.extend(counters(&update.own));
    lines.push(UpdateLine::player(
        update.own.player,
        "field",
        &update.own.field,
    ));

    lines.push(UpdateLine::player(
        update.opponent.player,
        "field",
        &update.opponent.field,
    ));
    lines.extend(counters(&update.opponent));

    lines
}
