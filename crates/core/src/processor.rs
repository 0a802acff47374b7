//! Round processor - the referee's state machine
//!
//! One call to [`RoundProcessor::play_round`] runs a full round for both
//! players:
//!
//! | Phase           | What happens                                          |
//! |-----------------|-------------------------------------------------------|
//! | `SpawnPending`  | pop the look-ahead piece, spawn it in both fields      |
//! | `AwaitingMoves` | send each bot its update, parse the reply              |
//! | `Executing`     | run each player's moves, force-drop loose pieces       |
//! | `Resolving`     | collapse rows, score, send garbage, raise the floor    |
//! | `RoundComplete` | ready for the next round                               |
//! | `MatchOver`     | the outcome is decided; no more rounds are played      |
//!
//! Players are always handled in seat order and never see each other's
//! field change until garbage is exchanged at the end of the round.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::CoreError;
use crate::field::{Field, RenderMode};
use crate::moves::{parse_moves, EngineWarning, Move, MoveNote};
use crate::player::PlayerState;
use crate::rng::PieceQueue;
use crate::scoring::score_round;
use crate::shape::Shape;
use crate::types::{MoveKind, PieceKind, PlayerId, ROUNDS_PER_SOLID};
use crate::update::{RoundUpdate, SideUpdate};

/// Match result so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    #[default]
    Undecided,
    Decided(PlayerId),
    Draw,
}

impl Outcome {
    /// Record that `winner` should win
    ///
    /// A second, different nomination turns the match into a draw. A draw
    /// is final.
    pub fn nominate(&mut self, winner: PlayerId) {
        *self = match *self {
            Outcome::Undecided => Outcome::Decided(winner),
            Outcome::Decided(current) if current == winner => Outcome::Decided(current),
            Outcome::Decided(_) | Outcome::Draw => Outcome::Draw,
        };
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::Undecided)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Outcome::Decided(winner) => Some(*winner),
            _ => None,
        }
    }
}

/// Where the processor is within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    SpawnPending,
    AwaitingMoves,
    Executing,
    Resolving,
    RoundComplete,
    MatchOver,
}

/// Supplies each bot's move line for a round
pub trait MoveSource {
    fn request_moves(&mut self, player: PlayerId, update: &RoundUpdate) -> String;
}

impl<F> MoveSource for F
where
    F: FnMut(PlayerId, &RoundUpdate) -> String,
{
    fn request_moves(&mut self, player: PlayerId, update: &RoundUpdate) -> String {
        self(player, update)
    }
}

/// Runs rounds for a two-player match
#[derive(Debug, Clone)]
pub struct RoundProcessor<R: Rng = StdRng> {
    players: [PlayerState; 2],
    round: u32,
    queue: PieceQueue,
    outcome: Outcome,
    phase: RoundPhase,
    rng: R,
}

impl RoundProcessor<StdRng> {
    /// Processor seeded from system entropy
    pub fn new(width: usize, height: usize) -> Result<Self, CoreError> {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Reproducible processor: the same seed and moves replay the same match
    pub fn seeded(width: usize, height: usize, seed: u64) -> Result<Self, CoreError> {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RoundProcessor<R> {
    pub fn with_rng(width: usize, height: usize, mut rng: R) -> Result<Self, CoreError> {
        let queue = PieceQueue::new(&mut rng);
        let mut players = [
            PlayerState::new(PlayerId::One, Field::new(width, height)?),
            PlayerState::new(PlayerId::Two, Field::new(width, height)?),
        ];

        // Round 0 marks the start of the match
        for player in &mut players {
            player.record(0, None, queue.peek());
        }

        Ok(Self {
            players,
            round: 0,
            queue,
            outcome: Outcome::Undecided,
            phase: RoundPhase::SpawnPending,
            rng,
        })
    }

    /// Last round started (0 before the first round)
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_decided()
    }

    /// Piece that spawns next round
    pub fn next_piece(&self) -> PieceKind {
        self.queue.peek()
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id.index()]
    }

    pub fn players(&self) -> &[PlayerState; 2] {
        &self.players
    }

    /// The update `id` receives for the current round
    ///
    /// `None` until the first piece has spawned.
    pub fn round_update(&self, id: PlayerId) -> Option<RoundUpdate> {
        let player = self.player(id);
        let shape = player.shape()?;

        Some(RoundUpdate {
            round: self.round,
            this_piece: shape.kind(),
            next_piece: self.queue.peek(),
            this_piece_position: shape.position(),
            own: SideUpdate::from_player(player),
            opponent: SideUpdate::from_player(self.player(id.opponent())),
        })
    }

    /// Play one full round. Does nothing once the match is over.
    pub fn play_round<S: MoveSource + ?Sized>(&mut self, source: &mut S) -> RoundPhase {
        if self.outcome.is_decided() {
            self.phase = RoundPhase::MatchOver;
            return self.phase;
        }

        self.spawn();
        if self.outcome.is_decided() {
            tracing::info!(round = self.round, outcome = ?self.outcome, "piece could not spawn");
            self.phase = RoundPhase::MatchOver;
            return self.phase;
        }

        self.phase = RoundPhase::AwaitingMoves;
        for id in PlayerId::ALL {
            self.collect_moves(id, source);
        }

        self.phase = RoundPhase::Executing;
        for id in PlayerId::ALL {
            self.execute_moves(id);
        }

        self.phase = RoundPhase::Resolving;
        self.resolve();

        self.phase = if self.outcome.is_decided() {
            tracing::info!(round = self.round, outcome = ?self.outcome, "match over");
            RoundPhase::MatchOver
        } else {
            RoundPhase::RoundComplete
        };
        self.phase
    }

    fn spawn(&mut self) {
        self.phase = RoundPhase::SpawnPending;
        self.round += 1;

        let kind = self.queue.draw(&mut self.rng);
        let next = self.queue.peek();
        tracing::info!(round = self.round, piece = %kind, next = %next, "playing round");

        for id in PlayerId::ALL {
            let player = &mut self.players[id.index()];
            let mut shape = Shape::new(kind, player.field().width());

            if !shape.spawn(player.field_mut()) {
                tracing::debug!(player = %id, piece = %kind, "spawn blocked");
                self.outcome.nominate(id.opponent());
            }

            player.set_shape(shape);
            player.record(self.round, None, next);
        }
    }

    fn collect_moves<S: MoveSource + ?Sized>(&mut self, id: PlayerId, source: &mut S) {
        let Some(update) = self.round_update(id) else {
            return;
        };

        let line = source.request_moves(id, &update);
        let (moves, warnings) = parse_moves(&line);
        tracing::debug!(player = %id, moves = moves.len(), "received moves");

        let player = self.player_mut(id);
        for warning in warnings {
            player.warn(warning);
        }
        player.set_moves(moves);
    }

    fn execute_moves(&mut self, id: PlayerId) {
        let round = self.round;
        let next = self.queue.peek();
        let player = &mut self.players[id.index()];
        player.begin_round();

        let mut last: Option<MoveKind> = None;
        let mut previous: Option<MoveKind> = None;
        let mut anchor_before_last = (-1, -1);

        let moves = player.moves().clone();
        for requested in moves {
            if player.shape().map_or(true, Shape::is_frozen) {
                player.warn(EngineWarning::PieceFrozen);
                break;
            }

            let skip_charged = requested.kind == MoveKind::Skip && player.spend_skip();
            let Some((shape, field)) = player.shape_and_field_mut() else {
                break;
            };

            anchor_before_last = shape.position();
            let note = apply_move(shape, field, requested.kind, skip_charged);
            if let Some(note) = note {
                tracing::debug!(player = %id, "{note}");
            }

            player.record(
                round,
                Some(Move {
                    kind: requested.kind,
                    note,
                }),
                next,
            );
            previous = last;
            last = Some(requested.kind);

            if requested.kind == MoveKind::Skip {
                break;
            }
        }

        // Force down a piece that is still loose
        let forced_drop_moved = match player.shape_and_field_mut() {
            Some((shape, field)) if !shape.is_frozen() => {
                let before = shape.position();
                shape.hard_drop(field);
                shape.position() != before
            }
            _ => false,
        };

        let t_spin = if forced_drop_moved {
            let (note, warning) = if last == Some(MoveKind::Skip) {
                (MoveNote::NoSkipsAvailable, EngineWarning::NoSkipsAvailable)
            } else {
                (MoveNote::LoosePiece, EngineWarning::LoosePiece)
            };
            player.record(round, Some(Move::with_note(MoveKind::Drop, note)), next);
            player.warn(warning);
            false
        } else {
            player.shape().is_some_and(|shape| {
                shape.check_t_spin(player.field(), last, previous, anchor_before_last)
            })
        };
        player.set_t_spin(t_spin);

        if player.shape().is_some_and(Shape::is_overflowing) {
            tracing::debug!(player = %id, "piece overflows the field");
            self.outcome.nominate(id.opponent());
        }
    }

    fn resolve(&mut self) {
        for player in &mut self.players {
            player.settle_field();
        }

        for id in PlayerId::ALL {
            let player = &mut self.players[id.index()];
            let score = score_round(&player.round_stats());
            player.apply_score(&score);

            if score.points > 0 {
                tracing::debug!(
                    player = %id,
                    points = score.points,
                    combo = score.combo,
                    garbage = score.rows_to_send,
                    "scored"
                );
            }

            let opponent = &mut self.players[id.opponent().index()];
            let overflow = opponent.field_mut().add_garbage_rows(
                score.rows_to_send as usize,
                score.first_is_single,
                &mut self.rng,
            );
            if overflow {
                tracing::debug!(player = %id.opponent(), "garbage pushed blocks off the field");
                self.outcome.nominate(id);
            }
        }

        if self.round % ROUNDS_PER_SOLID == 0 {
            for id in PlayerId::ALL {
                if self.players[id.index()].field_mut().add_solid_rows(1) {
                    tracing::debug!(player = %id, "solid row pushed blocks off the field");
                    self.outcome.nominate(id.opponent());
                }
            }
        }

        for player in &self.players {
            tracing::trace!(
                player = %player.id(),
                "field after round {}:\n{}",
                self.round,
                player.field().render(RenderMode::Pretty)
            );
        }
    }
}

fn apply_move(
    shape: &mut Shape,
    field: &mut Field,
    kind: MoveKind,
    skip_charged: bool,
) -> Option<MoveNote> {
    match kind {
        MoveKind::Left => shape.one_left(field),
        MoveKind::Right => shape.one_right(field),
        MoveKind::TurnLeft => shape.turn_left(field),
        MoveKind::TurnRight => shape.turn_right(field),
        MoveKind::Down => {
            shape.one_down(field);
            None
        }
        MoveKind::Drop => {
            shape.hard_drop(field);
            None
        }
        MoveKind::Skip => {
            if skip_charged {
                shape.skip(field);
            }
            None
        }
    }
}
