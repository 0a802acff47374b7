//! Match runner - plays rounds until someone loses or the round limit hits

use rand::rngs::StdRng;
use rand::Rng;

use blockbattle_core::{CoreError, MoveSource, Outcome, PlayerState, RoundProcessor};
use blockbattle_protocol::MatchReport;

use crate::config::MatchConfig;
use crate::types::PlayerId;

/// Final counters of one player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub row_points: u32,
    pub combo: u32,
    pub skips: u32,
    pub warnings: usize,
}

impl From<&PlayerState> for PlayerSummary {
    fn from(player: &PlayerState) -> Self {
        Self {
            id: player.id(),
            row_points: player.row_points(),
            combo: player.combo(),
            skips: player.skips(),
            warnings: player.warnings().len(),
        }
    }
}

/// Result of [`MatchRunner::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    pub outcome: Outcome,
    pub rounds: u32,
    /// False when the round limit stopped the match
    pub finished: bool,
    pub players: [PlayerSummary; 2],
}

/// Drives a [`RoundProcessor`] through a whole match
pub struct MatchRunner<R: Rng = StdRng> {
    config: MatchConfig,
    processor: RoundProcessor<R>,
}

impl MatchRunner<StdRng> {
    /// Seeded from `config.seed`, or from entropy when unset
    pub fn new(config: MatchConfig) -> Result<Self, CoreError> {
        let processor = match config.seed {
            Some(seed) => RoundProcessor::seeded(config.field_width, config.field_height, seed)?,
            None => RoundProcessor::new(config.field_width, config.field_height)?,
        };
        Ok(Self { config, processor })
    }
}

impl<R: Rng> MatchRunner<R> {
    pub fn with_rng(config: MatchConfig, rng: R) -> Result<Self, CoreError> {
        let processor = RoundProcessor::with_rng(config.field_width, config.field_height, rng)?;
        Ok(Self { config, processor })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn processor(&self) -> &RoundProcessor<R> {
        &self.processor
    }

    pub fn processor_mut(&mut self) -> &mut RoundProcessor<R> {
        &mut self.processor
    }

    /// Play until the outcome is decided or `max_rounds` rounds were played
    pub fn run<S: MoveSource + ?Sized>(&mut self, source: &mut S) -> MatchSummary {
        tracing::info!(
            width = self.config.field_width,
            height = self.config.field_height,
            seed = ?self.config.seed,
            "match started"
        );

        while !self.processor.is_over() {
            if self
                .config
                .max_rounds
                .is_some_and(|limit| self.processor.round() >= limit)
            {
                tracing::info!(round = self.processor.round(), "round limit reached");
                break;
            }
            self.processor.play_round(source);
        }

        let summary = self.summary();
        tracing::info!(
            rounds = summary.rounds,
            outcome = ?summary.outcome,
            "match finished"
        );
        summary
    }

    pub fn summary(&self) -> MatchSummary {
        let [one, two] = self.processor.players();
        MatchSummary {
            outcome: self.processor.outcome(),
            rounds: self.processor.round(),
            finished: self.processor.is_over(),
            players: [PlayerSummary::from(one), PlayerSummary::from(two)],
        }
    }

    /// JSON-ready report with both histories
    pub fn report(&self) -> MatchReport {
        MatchReport::from_processor(&self.processor, self.config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptedSource;
    use blockbattle_core::types::{Cell, PieceKind};
    use rand::rngs::mock::StepRng;

    fn config(max_rounds: Option<u32>) -> MatchConfig {
        MatchConfig {
            max_rounds,
            ..Default::default()
        }
    }

    #[test]
    fn test_round_limit_stops_unfinished() {
        let mut runner = MatchRunner::with_rng(config(Some(3)), StepRng::new(0, 0)).unwrap();
        let mut source = ScriptedSource::from_replies(["left,left,left,drop"; 5], ["drop"; 5]);

        let summary = runner.run(&mut source);
        assert_eq!(summary.rounds, 3);
        assert!(!summary.finished);
        assert_eq!(summary.outcome, Outcome::Undecided);
        assert_eq!(summary.players[0].id, PlayerId::One);
        assert_eq!(summary.players[1].warnings, 0);
    }

    #[test]
    fn test_empty_script_ends_by_stacking_out() {
        // Every piece is an I dropped in the same columns, so both fields
        // top out in the same round
        let mut runner = MatchRunner::with_rng(config(None), StepRng::new(0, 0)).unwrap();
        let mut source = ScriptedSource::default();

        let summary = runner.run(&mut source);
        assert!(summary.finished);
        assert_eq!(summary.outcome, Outcome::Draw);
        assert!(summary.rounds > 1);
    }

    #[test]
    fn test_blocked_spawn_decides_first_round() {
        let mut runner = MatchRunner::with_rng(config(None), StepRng::new(0, 0)).unwrap();
        runner
            .processor_mut()
            .player_mut(PlayerId::Two)
            .field_mut()
            .set(6, 0, Cell::Block(PieceKind::Garbage));

        let summary = runner.run(&mut ScriptedSource::default());
        assert_eq!(summary.outcome, Outcome::Decided(PlayerId::One));
        assert_eq!(summary.rounds, 1);

        let report = runner.report();
        assert_eq!(report.rounds, 1);
        assert_eq!(report.players[0].history.len(), 2);
    }

    #[test]
    fn test_seeded_runners_agree() {
        let cfg = MatchConfig {
            seed: Some(2024),
            max_rounds: Some(20),
            ..Default::default()
        };
        let replies = ["left,turnright,drop", "right,right,drop", "turnleft,drop"];

        let mut a = MatchRunner::new(cfg).unwrap();
        let mut b = MatchRunner::new(cfg).unwrap();
        let sa = a.run(&mut ScriptedSource::from_replies(replies, replies));
        let sb = b.run(&mut ScriptedSource::from_replies(replies, replies));

        assert_eq!(sa, sb);
        assert_eq!(a.report(), b.report());
    }

    #[test]
    fn test_invalid_dimensions() {
        let cfg = MatchConfig {
            field_width: 2,
            ..Default::default()
        };
        assert!(MatchRunner::new(cfg).is_err());
    }
}
