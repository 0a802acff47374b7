//! Move parsing and legality notes
//!
//! Bots send one comma-separated line per round, e.g.
//! `left,left,turnright,drop`. Parsing is lenient: unknown tokens are
//! dropped with a warning and an empty token ends the list.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{MoveKind, MAX_MOVES};

/// Why a move did not run as requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveNote {
    /// Sideways move hit the field edge and became `down`
    ShiftOutOfBounds(MoveKind),
    /// Sideways move hit a block and became `down`
    ShiftBlocked(MoveKind),
    /// Rotation would leave the field; nothing happened
    TurnOutOfBounds(MoveKind),
    /// Rotation would overlap blocks; nothing happened
    TurnBlocked(MoveKind),
    /// The piece was still falling after the list ended
    LoosePiece,
    /// `skip` was requested without a skip charge
    NoSkipsAvailable,
}

impl fmt::Display for MoveNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveNote::ShiftOutOfBounds(kind) => write!(
                f,
                "Can't perform {kind}: Piece is on the field boundary. Action changed to 'down'."
            ),
            MoveNote::ShiftBlocked(kind) => write!(
                f,
                "Can't perform {kind}: Other blocks are in the way. Action changed to 'down'."
            ),
            MoveNote::TurnOutOfBounds(kind) => write!(
                f,
                "Can't perform {kind}: Piece would move out of bounds. Move skipped."
            ),
            MoveNote::TurnBlocked(kind) => write!(
                f,
                "Can't perform {kind}: Other blocks are in the way. Move skipped."
            ),
            MoveNote::LoosePiece => f.write_str("The piece is still loose in the field. Dropping it."),
            MoveNote::NoSkipsAvailable => {
                f.write_str("Can't perform 'skip'. There were no skips available.")
            }
        }
    }
}

/// Problems with a player's input that the engine recovered from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EngineWarning {
    /// Token that is not one of the seven move names
    UnparseableMove(String),
    /// The list had more than `MAX_MOVES` entries
    TooManyMoves,
    /// A move arrived after the piece was already placed
    PieceFrozen,
    /// The list ended with the piece still falling
    LoosePiece,
    /// `skip` without a skip charge
    NoSkipsAvailable,
}

impl fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineWarning::UnparseableMove(token) => {
                write!(f, "Failed to parse move '{token}'")
            }
            EngineWarning::TooManyMoves => {
                write!(f, "Too many moves, only the first {MAX_MOVES} are used")
            }
            EngineWarning::PieceFrozen => {
                f.write_str("Piece is already placed, remaining moves are ignored")
            }
            EngineWarning::LoosePiece => f.write_str("Piece was still loose, it was dropped"),
            EngineWarning::NoSkipsAvailable => f.write_str("No skips available"),
        }
    }
}

/// An executed or pending move with its legality note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub kind: MoveKind,
    pub note: Option<MoveNote>,
}

impl Move {
    pub fn new(kind: MoveKind) -> Self {
        Self { kind, note: None }
    }

    pub fn with_note(kind: MoveKind, note: MoveNote) -> Self {
        Self {
            kind,
            note: Some(note),
        }
    }

    pub fn is_legal(&self) -> bool {
        self.note.is_none()
    }
}

/// The note for illegal moves, the move name otherwise
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.note {
            Some(note) => fmt::Display::fmt(note, f),
            None => fmt::Display::fmt(&self.kind, f),
        }
    }
}

/// Moves honored in one round
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// Parse a bot's move line
///
/// Tokens are trimmed and matched case-insensitively. An empty token stops
/// parsing. Only the first `MAX_MOVES` tokens are looked at, whether or not
/// they parse.
pub fn parse_moves(input: &str) -> (MoveList, Vec<EngineWarning>) {
    let mut moves = MoveList::new();
    let mut warnings = Vec::new();

    for (index, token) in input.split(',').enumerate() {
        let token = token.trim();
        if token.is_empty() {
            break;
        }
        if index == MAX_MOVES {
            warnings.push(EngineWarning::TooManyMoves);
            break;
        }

        match MoveKind::from_str(token) {
            // index < MAX_MOVES, so the list has room
            Some(kind) => moves.push(Move::new(kind)),
            None => warnings.push(EngineWarning::UnparseableMove(token.to_string())),
        }
    }

    (moves, warnings)
}
