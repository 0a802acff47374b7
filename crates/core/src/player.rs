//! Player module - one seat's field, piece, counters and logs

use crate::field::{Field, RenderMode};
use crate::moves::{EngineWarning, Move, MoveList};
use crate::scoring::{RoundStats, ScoreResult};
use crate::shape::Shape;
use crate::types::{PieceKind, PlayerId};

/// Snapshot stored for the visualizer after each step of a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub round: u32,
    /// `None` for round-start entries
    pub mv: Option<Move>,
    pub combo: u32,
    pub skips: u32,
    /// Banked row points at the time of the snapshot
    pub points: u32,
    pub next_piece: PieceKind,
    /// Field in visualizer notation
    pub field: String,
}

impl HistoryRecord {
    /// Move text as shown by the visualizer (empty for round starts)
    pub fn move_description(&self) -> String {
        self.mv.map(|mv| mv.to_string()).unwrap_or_default()
    }
}

/// Everything the referee tracks for one player
#[derive(Debug, Clone)]
pub struct PlayerState {
    id: PlayerId,
    field: Field,
    shape: Option<Shape>,
    moves: MoveList,

    row_points: u32,
    combo: u32,
    skips: u32,

    used_skip: bool,
    t_spin: bool,
    field_cleared: bool,
    rows_removed: u32,

    history: Vec<HistoryRecord>,
    warnings: Vec<EngineWarning>,
}

impl PlayerState {
    pub fn new(id: PlayerId, field: Field) -> Self {
        Self {
            id,
            field,
            shape: None,
            moves: MoveList::new(),
            row_points: 0,
            combo: 0,
            skips: 0,
            used_skip: false,
            t_spin: false,
            field_cleared: false,
            rows_removed: 0,
            history: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Direct field access, for setting up positions in tests and tools
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    /// The piece of the current round
    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }

    pub(crate) fn shape_and_field_mut(&mut self) -> Option<(&mut Shape, &mut Field)> {
        self.shape.as_mut().map(|shape| (shape, &mut self.field))
    }

    pub(crate) fn set_shape(&mut self, shape: Shape) {
        self.shape = Some(shape);
    }

    /// Moves parsed for the current round
    pub fn moves(&self) -> &MoveList {
        &self.moves
    }

    pub(crate) fn set_moves(&mut self, moves: MoveList) {
        self.moves = moves;
    }

    pub fn row_points(&self) -> u32 {
        self.row_points
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn skips(&self) -> u32 {
        self.skips
    }

    /// Grant skip charges, e.g. when setting up a position
    pub fn add_skips(&mut self, amount: u32) {
        self.skips += amount;
    }

    /// Spend one skip charge. Returns false when there is none.
    pub(crate) fn spend_skip(&mut self) -> bool {
        if self.skips == 0 {
            return false;
        }
        self.skips -= 1;
        self.used_skip = true;
        true
    }

    pub fn used_skip(&self) -> bool {
        self.used_skip
    }

    pub fn t_spin(&self) -> bool {
        self.t_spin
    }

    pub(crate) fn set_t_spin(&mut self, t_spin: bool) {
        self.t_spin = t_spin;
    }

    pub fn field_cleared(&self) -> bool {
        self.field_cleared
    }

    pub fn rows_removed(&self) -> u32 {
        self.rows_removed
    }

    /// Reset per-round flags before executing a new move list
    pub(crate) fn begin_round(&mut self) {
        self.used_skip = false;
        self.t_spin = false;
        self.field_cleared = false;
        self.rows_removed = 0;
    }

    /// Collapse full rows and remember what happened
    pub(crate) fn settle_field(&mut self) {
        self.rows_removed = self.field.clear_and_collapse();
        self.field_cleared = self.field.is_cleared();
    }

    /// Inputs for scoring this round
    pub fn round_stats(&self) -> RoundStats {
        RoundStats {
            rows_removed: self.rows_removed,
            t_spin: self.t_spin,
            field_cleared: self.field_cleared,
            used_skip: self.used_skip,
            combo: self.combo,
            row_points: self.row_points,
        }
    }

    /// Bank a scored round
    pub(crate) fn apply_score(&mut self, score: &ScoreResult) {
        self.row_points = score.row_points;
        self.combo = score.combo;
        if score.skip_awarded {
            self.skips += 1;
        }
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    pub(crate) fn record(&mut self, round: u32, mv: Option<Move>, next_piece: PieceKind) {
        self.history.push(HistoryRecord {
            round,
            mv,
            combo: self.combo,
            skips: self.skips,
            points: self.row_points,
            next_piece,
            field: self.field.render(RenderMode::Visualizer),
        });
    }

    /// Engine warnings collected over the whole match
    pub fn warnings(&self) -> &[EngineWarning] {
        &self.warnings
    }

    pub(crate) fn warn(&mut self, warning: EngineWarning) {
        tracing::warn!(player = %self.id, "{warning}");
        self.warnings.push(warning);
    }
}
