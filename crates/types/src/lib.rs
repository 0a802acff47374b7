//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the referee.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules engine, match runner, wire protocol).
//!
//! # Field Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn anchor**: `((width - size) / 2, -1)`, one row above the field
//!
//! # Match Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_MOVES` | 40 | Moves honored per player per round |
//! | `ROUNDS_PER_SOLID` | 15 | A solid row rises every 15 rounds |
//! | `POINTS_PER_GARBAGE` | 3 | Row points converted into one garbage line |
//! | `PERFECT_CLEAR_SCORE` | 18 | Replaces the round score on a perfect clear |
//!
//! # Examples
//!
//! ```
//! use blockbattle_types::{MoveKind, PieceKind, PlayerId, FIELD_WIDTH, FIELD_HEIGHT};
//!
//! // Parse a piece kind (case-insensitive)
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//!
//! // Parse a move token
//! assert_eq!(MoveKind::from_str("TurnLeft"), Some(MoveKind::TurnLeft));
//!
//! // Players know their opponent
//! assert_eq!(PlayerId::One.opponent(), PlayerId::Two);
//!
//! // Field dimensions
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! ```

use std::fmt;

/// Default field width in cells (10 columns)
pub const FIELD_WIDTH: usize = 10;

/// Default field height in cells (20 rows)
pub const FIELD_HEIGHT: usize = 20;

/// Maximum number of moves executed per player per round
pub const MAX_MOVES: usize = 40;

/// A solid row is added to both fields every this many rounds
pub const ROUNDS_PER_SOLID: u32 = 15;

/// Row points needed to send one garbage line
pub const POINTS_PER_GARBAGE: u32 = 3;

/// Row points for clearing 0..=4 rows without a T-spin
///
/// A single clear earns nothing on its own (only the combo bonus).
pub const LINE_SCORES: [u32; 5] = [0, 0, 3, 6, 10];

/// Row points for a T-spin single
pub const SINGLE_T_SCORE: u32 = 5;

/// Row points for a T-spin double
pub const DOUBLE_T_SCORE: u32 = 10;

/// Row points for clearing every block from the field
pub const PERFECT_CLEAR_SCORE: u32 = 18;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_table_defaults() {
        assert_eq!(LINE_SCORES, [0, 0, 3, 6, 10]);
        assert_eq!(SINGLE_T_SCORE, 5);
        assert_eq!(DOUBLE_T_SCORE, 10);
        assert_eq!(PERFECT_CLEAR_SCORE, 18);
        assert_eq!(POINTS_PER_GARBAGE, 3);
        assert_eq!(ROUNDS_PER_SOLID, 15);
        assert_eq!(MAX_MOVES, 40);
    }

    #[test]
    fn cell_codes_and_letters() {
        assert_eq!(Cell::Empty.state().code(), 0);
        assert_eq!(Cell::Shape(PieceKind::T).state().code(), 1);
        assert_eq!(Cell::Block(PieceKind::Garbage).state().code(), 2);
        assert_eq!(Cell::Solid.state().code(), 3);

        assert_eq!(Cell::Solid.kind(), None);
        assert_eq!(Cell::Block(PieceKind::Garbage).kind(), Some(PieceKind::Garbage));
        assert_eq!(PieceKind::Garbage.letter(), 'G');
    }

    #[test]
    fn move_kind_parse_is_case_insensitive() {
        assert_eq!(MoveKind::from_str("DROP"), Some(MoveKind::Drop));
        assert_eq!(MoveKind::from_str("turnRight"), Some(MoveKind::TurnRight));
        assert_eq!(MoveKind::from_str("hold"), None);
        assert_eq!(MoveKind::from_str(""), None);
    }
}

/// Piece kinds: the seven tetrominoes plus the garbage marker
///
/// `Garbage` never spawns; it only tags the blocks of garbage rows so the
/// visualizer can render them as `G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
    Garbage,
}

impl PieceKind {
    /// The seven kinds that can be drawn for spawning, in draw-index order
    pub const PLAYABLE: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockbattle_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("G"), Some(PieceKind::Garbage));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Some(PieceKind::I),
            "J" => Some(PieceKind::J),
            "L" => Some(PieceKind::L),
            "O" => Some(PieceKind::O),
            "S" => Some(PieceKind::S),
            "T" => Some(PieceKind::T),
            "Z" => Some(PieceKind::Z),
            "G" => Some(PieceKind::Garbage),
            _ => None,
        }
    }

    /// Uppercase name used on the wire (`I`, `J`, ..., `G`)
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
            PieceKind::Garbage => "G",
        }
    }

    /// Single letter used by the visualizer field rendering
    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
            PieceKind::Garbage => 'G',
        }
    }

    pub fn is_playable(&self) -> bool {
        !matches!(self, PieceKind::Garbage)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occupancy state of a cell, without its piece tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Empty,
    Shape,
    Block,
    Solid,
}

impl CellState {
    /// Numeric code used by the compact field rendering
    pub fn code(&self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Shape => 1,
            CellState::Block => 2,
            CellState::Solid => 3,
        }
    }
}

/// A cell on the playfield
///
/// - `Empty`: free
/// - `Shape(kind)`: occupied by the active (unplaced) piece
/// - `Block(kind)`: a placed piece or garbage
/// - `Solid`: a permanent floor row
///
/// The piece tag only exists where it means something.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Shape(PieceKind),
    Block(PieceKind),
    Solid,
}

impl Cell {
    pub fn state(&self) -> CellState {
        match self {
            Cell::Empty => CellState::Empty,
            Cell::Shape(_) => CellState::Shape,
            Cell::Block(_) => CellState::Block,
            Cell::Solid => CellState::Solid,
        }
    }

    /// Piece tag for `Shape` and `Block` cells
    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Cell::Shape(kind) | Cell::Block(kind) => Some(*kind),
            Cell::Empty | Cell::Solid => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, Cell::Shape(_))
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Cell::Block(_))
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, Cell::Solid)
    }

    /// Cells a piece cannot move into
    pub fn is_obstacle(&self) -> bool {
        matches!(self, Cell::Block(_) | Cell::Solid)
    }
}

/// Moves an agent can submit
///
/// Parsed once from the textual move list; execution dispatches on this
/// closed enum only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Down,
    Left,
    Right,
    TurnLeft,
    TurnRight,
    Drop,
    Skip,
}

impl MoveKind {
    /// Parse a move token (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockbattle_types::MoveKind;
    ///
    /// assert_eq!(MoveKind::from_str("left"), Some(MoveKind::Left));
    /// assert_eq!(MoveKind::from_str("SKIP"), Some(MoveKind::Skip));
    /// assert_eq!(MoveKind::from_str("moveLeft"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "down" => Some(MoveKind::Down),
            "left" => Some(MoveKind::Left),
            "right" => Some(MoveKind::Right),
            "turnleft" => Some(MoveKind::TurnLeft),
            "turnright" => Some(MoveKind::TurnRight),
            "drop" => Some(MoveKind::Drop),
            "skip" => Some(MoveKind::Skip),
            _ => None,
        }
    }

    /// Lowercase token as agents send it
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveKind::Down => "down",
            MoveKind::Left => "left",
            MoveKind::Right => "right",
            MoveKind::TurnLeft => "turnleft",
            MoveKind::TurnRight => "turnright",
            MoveKind::Drop => "drop",
            MoveKind::Skip => "skip",
        }
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self, MoveKind::TurnLeft | MoveKind::TurnRight)
    }

    /// Moves that can settle a piece
    pub fn is_descent(&self) -> bool {
        matches!(self, MoveKind::Down | MoveKind::Drop)
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two seats in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Both seats, in processing order
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn opponent(&self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Index into per-player arrays
    pub fn index(&self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// Bot name used on the wire (`player1`, `player2`)
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerId::One => "player1",
            PlayerId::Two => "player2",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "player1" => Some(PlayerId::One),
            "player2" => Some(PlayerId::Two),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
