//! Shape module - the active piece and its movement rules
//!
//! Each piece lives in a square bounding matrix (4x4 for I, 2x2 for O, 3x3 for
//! the rest). Rotation turns the whole matrix by 90 degrees; there are no wall
//! kicks. Every transform builds a candidate `Shape` value, validates it against
//! the field, and only then replaces the live piece and repaints its cells.
//!
//! A shape only stores coordinates. The field owns the cells.

use crate::field::Field;
use crate::moves::MoveNote;
use crate::types::{Cell, MoveKind, PieceKind};

/// Offset of a single mino inside the bounding matrix
pub type MinoOffset = (i32, i32);

/// The four mino offsets of a piece
pub type ShapeCells = [MinoOffset; 4];

/// Matrix corners checked for T-spins, relative to the anchor
const T_CORNERS: [MinoOffset; 4] = [(0, 0), (2, 0), (0, 2), (2, 2)];

/// Bounding matrix size and spawn-orientation offsets for a piece kind
///
/// `Garbage` has no geometry and maps to the O square here. `Shape`
/// construction rejects it in debug builds.
pub fn spawn_cells(kind: PieceKind) -> (i32, ShapeCells) {
    match kind {
        PieceKind::I => (4, [(0, 1), (1, 1), (2, 1), (3, 1)]),
        PieceKind::J => (3, [(0, 0), (0, 1), (1, 1), (2, 1)]),
        PieceKind::L => (3, [(2, 0), (0, 1), (1, 1), (2, 1)]),
        PieceKind::O | PieceKind::Garbage => (2, [(0, 0), (1, 0), (0, 1), (1, 1)]),
        PieceKind::S => (3, [(1, 0), (2, 0), (0, 1), (1, 1)]),
        PieceKind::T => (3, [(1, 0), (0, 1), (1, 1), (2, 1)]),
        PieceKind::Z => (3, [(0, 0), (1, 0), (1, 1), (2, 1)]),
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    fn move_kind(self) -> MoveKind {
        match self {
            Turn::Left => MoveKind::TurnLeft,
            Turn::Right => MoveKind::TurnRight,
        }
    }
}

/// Rotate offsets inside a `size x size` matrix
///
/// Left is transpose then reverse rows, right is transpose then reverse
/// columns. Offset order is preserved, so a left turn followed by a right turn
/// returns the exact same array.
pub fn rotate_cells(cells: ShapeCells, size: i32, turn: Turn) -> ShapeCells {
    cells.map(|(x, y)| match turn {
        Turn::Left => (y, size - 1 - x),
        Turn::Right => (size - 1 - y, x),
    })
}

/// The active piece of one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: PieceKind,
    size: i32,
    cells: ShapeCells,
    x: i32,
    y: i32,
    frozen: bool,
    skipped: bool,
}

impl Shape {
    /// Create a piece at the spawn anchor for a field of the given width
    pub fn new(kind: PieceKind, field_width: usize) -> Self {
        let (size, _) = spawn_cells(kind);
        Self::at(kind, (field_width as i32 - size) / 2, -1)
    }

    /// Create a piece in spawn orientation with its matrix at (x, y)
    pub fn at(kind: PieceKind, x: i32, y: i32) -> Self {
        debug_assert!(kind.is_playable(), "{kind} is not a playable piece");
        let (size, cells) = spawn_cells(kind);
        Self {
            kind,
            size,
            cells,
            x,
            y,
            frozen: false,
            skipped: false,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Bounding matrix size
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Matrix anchor (top-left corner of the bounding square)
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Anchor formatted for the `this_piece_position` update
    pub fn position_string(&self) -> String {
        format!("{},{}", self.x, self.y)
    }

    /// Offsets inside the bounding matrix for the current orientation
    pub fn offsets(&self) -> ShapeCells {
        self.cells
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    /// Absolute field coordinates of the four minos
    pub fn blocks(&self) -> [(i32, i32); 4] {
        self.cells.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Place the piece on the field. Returns false if it spawns into blocks.
    pub fn spawn(&mut self, field: &mut Field) -> bool {
        if self.has_collision(field) {
            return false;
        }
        self.paint(field);
        true
    }

    fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    fn turned(&self, turn: Turn) -> Self {
        Self {
            cells: rotate_cells(self.cells, self.size, turn),
            ..*self
        }
    }

    /// Any mino left or right of the field
    pub fn is_out_of_bounds(&self, field: &Field) -> bool {
        self.blocks()
            .iter()
            .any(|&(x, _)| x < 0 || x >= field.width() as i32)
    }

    /// Any mino under the last row
    pub fn is_below_bottom(&self, field: &Field) -> bool {
        self.blocks()
            .iter()
            .any(|&(_, y)| y >= field.height() as i32)
    }

    /// Any in-bounds mino on a block or solid cell
    pub fn has_collision(&self, field: &Field) -> bool {
        self.blocks()
            .iter()
            .any(|&(x, y)| field.is_obstacle(x, y))
    }

    /// Any mino above the field. A skipped piece never overflows.
    pub fn is_overflowing(&self) -> bool {
        !self.skipped && self.blocks().iter().any(|&(_, y)| y < 0)
    }

    /// Commit a validated candidate: clear the old cells and paint the new ones
    fn take_position(&mut self, candidate: Shape, field: &mut Field) {
        *self = candidate;
        field.clear_shape_cells();
        self.paint(field);
    }

    fn paint(&self, field: &mut Field) {
        for (x, y) in self.blocks() {
            if field.get(x, y) == Some(Cell::Empty) {
                field.set(x, y, Cell::Shape(self.kind));
            }
        }
    }

    fn freeze(&mut self, field: &mut Field) {
        for (x, y) in self.blocks() {
            match field.get(x, y) {
                Some(cell) if !cell.is_obstacle() => {
                    field.set(x, y, Cell::Block(self.kind));
                }
                Some(_) => {
                    tracing::debug!(x, y, kind = %self.kind, "cannot freeze onto an occupied cell");
                }
                None => {}
            }
        }
        self.frozen = true;
    }

    fn turn(&mut self, field: &mut Field, turn: Turn) -> Option<MoveNote> {
        let candidate = self.turned(turn);
        let kind = turn.move_kind();

        if candidate.is_out_of_bounds(field) || candidate.is_below_bottom(field) {
            return Some(MoveNote::TurnOutOfBounds(kind));
        }
        if candidate.has_collision(field) {
            return Some(MoveNote::TurnBlocked(kind));
        }

        self.take_position(candidate, field);
        None
    }

    /// Rotate 90 degrees counter-clockwise; a blocked turn leaves the piece as is
    pub fn turn_left(&mut self, field: &mut Field) -> Option<MoveNote> {
        self.turn(field, Turn::Left)
    }

    /// Rotate 90 degrees clockwise; a blocked turn leaves the piece as is
    pub fn turn_right(&mut self, field: &mut Field) -> Option<MoveNote> {
        self.turn(field, Turn::Right)
    }

    fn shift(&mut self, field: &mut Field, dx: i32, kind: MoveKind) -> Option<MoveNote> {
        let candidate = self.translated(dx, 0);

        let note = if candidate.is_out_of_bounds(field) {
            Some(MoveNote::ShiftOutOfBounds(kind))
        } else if candidate.has_collision(field) {
            Some(MoveNote::ShiftBlocked(kind))
        } else {
            None
        };

        match note {
            None => self.take_position(candidate, field),
            // A blocked sideways move becomes a step down
            Some(_) => self.one_down(field),
        }
        note
    }

    /// Shift one column left, falling back to `one_down` when blocked
    pub fn one_left(&mut self, field: &mut Field) -> Option<MoveNote> {
        self.shift(field, -1, MoveKind::Left)
    }

    /// Shift one column right, falling back to `one_down` when blocked
    pub fn one_right(&mut self, field: &mut Field) -> Option<MoveNote> {
        self.shift(field, 1, MoveKind::Right)
    }

    /// Step one row down, or freeze in place if that is not possible
    pub fn one_down(&mut self, field: &mut Field) {
        let candidate = self.translated(0, 1);
        if candidate.is_below_bottom(field) || candidate.has_collision(field) {
            self.freeze(field);
        } else {
            self.take_position(candidate, field);
        }
    }

    /// Drop straight down until frozen
    pub fn hard_drop(&mut self, field: &mut Field) {
        while !self.frozen {
            self.one_down(field);
        }
    }

    /// Remove the piece without leaving blocks behind
    pub fn skip(&mut self, field: &mut Field) {
        for (x, y) in self.blocks() {
            if matches!(field.get(x, y), Some(cell) if cell.is_shape()) {
                field.set(x, y, Cell::Empty);
            }
        }
        self.frozen = true;
        self.skipped = true;
    }

    /// Whether a settled T piece counts as a T-spin
    ///
    /// `last` and `previous` are the two most recently executed moves and
    /// `anchor_before_last` is the anchor right before `last` ran. The last
    /// move must be a turn, or a down/drop straight after a turn that did not
    /// move the anchor. Then at least three matrix corners must be blocks.
    pub fn check_t_spin(
        &self,
        field: &Field,
        last: Option<MoveKind>,
        previous: Option<MoveKind>,
        anchor_before_last: (i32, i32),
    ) -> bool {
        if self.kind != PieceKind::T {
            return false;
        }

        let (Some(last), Some(previous)) = (last, previous) else {
            return false;
        };

        let turned_in = last.is_rotation()
            || (last.is_descent()
                && previous.is_rotation()
                && anchor_before_last == self.position());
        if !turned_in {
            return false;
        }

        let blocked_corners = T_CORNERS
            .iter()
            .filter(|&&(cx, cy)| {
                matches!(field.get(self.x + cx, self.y + cy), Some(cell) if cell.is_block())
            })
            .count();

        blocked_corners >= 3
    }
}
