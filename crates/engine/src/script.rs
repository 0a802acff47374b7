//! Scripted move source - replays canned replies round by round

use blockbattle_core::{MoveSource, RoundUpdate};
use blockbattle_protocol::MatchScript;

use crate::types::PlayerId;

/// Answers each request with the scripted reply for that round
///
/// Rounds past the end of a player's list get an empty reply, which makes
/// the referee force-drop the piece.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: MatchScript,
}

impl ScriptedSource {
    pub fn new(script: MatchScript) -> Self {
        Self { script }
    }

    /// Build from per-player reply lists
    pub fn from_replies<S: Into<String>>(
        player1: impl IntoIterator<Item = S>,
        player2: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(MatchScript {
            players: vec![
                player1.into_iter().map(Into::into).collect(),
                player2.into_iter().map(Into::into).collect(),
            ],
            ..Default::default()
        })
    }

    pub fn script(&self) -> &MatchScript {
        &self.script
    }
}

impl MoveSource for ScriptedSource {
    fn request_moves(&mut self, player: PlayerId, update: &RoundUpdate) -> String {
        self.script.reply(player, update.round).to_string()
    }
}
