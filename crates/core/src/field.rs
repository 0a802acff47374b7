//! Field module - one player's playfield
//!
//! The field is a `width x height` grid where each cell is empty, part of the
//! active piece, a placed block, or a permanent solid floor cell.
//! Uses a flat buffer (row-major, `y * width + x`) so row shifts are plain
//! `copy_within` moves and nothing ever aliases a cell.
//!
//! Coordinates: (x, y) where x grows to the right and y grows downwards.
//! Row 0 is the top row; solid rows accumulate at the bottom.

use std::fmt::Write as _;

use rand::Rng;

use crate::error::CoreError;
use crate::types::{Cell, PieceKind};

/// How [`Field::render`] encodes cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Numeric state codes, `,` between cells and `;` between rows
    Compact,
    /// Like `Compact`, but tagged cells show their piece letter
    Visualizer,
    /// State codes laid out for a terminal, for debug logs
    Pretty,
}

/// A player's playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: usize,
    height: usize,
    /// Number of solid rows at the bottom
    solid_rows: usize,
    cells: Vec<Cell>,
}

impl Field {
    /// Create an empty field
    ///
    /// The field must be at least 4 cells wide (so the I piece fits) and 4
    /// rows tall.
    pub fn new(width: usize, height: usize) -> Result<Self, CoreError> {
        if width < 4 || height < 4 {
            return Err(CoreError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            solid_rows: 0,
            cells: vec![Cell::Empty; width * height],
        })
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn solid_rows(&self) -> usize {
        self.solid_rows
    }

    /// Rows above the solid floor
    fn live_rows(&self) -> usize {
        self.height - self.solid_rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is in bounds and holds a block or solid cell
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(cell) if cell.is_obstacle())
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    fn row_mut(&mut self, y: usize) -> &mut [Cell] {
        let start = y * self.width;
        &mut self.cells[start..start + self.width]
    }

    /// A row is full when every cell is a placed block
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().all(Cell::is_block)
    }

    /// Move every non-solid row up by `amount`, dropping rows pushed past the top.
    ///
    /// Returns true if a dropped row held anything, or if `amount` is more
    /// than the rows above the solid floor (overflow). The `amount` rows freed
    /// just above the solid floor keep their old content; callers overwrite
    /// them.
    pub fn shift_up(&mut self, amount: usize) -> bool {
        if amount == 0 {
            return false;
        }

        let live = self.live_rows();
        let discarded = amount.min(live);
        let overflow = amount > live
            || self.cells[..discarded * self.width]
                .iter()
                .any(|cell| !cell.is_empty());

        if amount < live {
            self.cells
                .copy_within(amount * self.width..live * self.width, 0);
        }

        overflow
    }

    /// Push `amount` solid rows in from the bottom. Returns true on overflow.
    pub fn add_solid_rows(&mut self, amount: usize) -> bool {
        let overflow = self.shift_up(amount);
        let live = self.live_rows();
        let added = amount.min(live);

        for y in live - added..live {
            self.row_mut(y).fill(Cell::Solid);
        }
        self.solid_rows += added;

        overflow
    }

    /// Push `amount` garbage rows in from the bottom. Returns true on overflow.
    ///
    /// Rows are built bottom first. Every row gets one random hole; rows
    /// alternate between one and two holes, starting with a single-hole row
    /// when `first_is_single` is set.
    pub fn add_garbage_rows<R: Rng + ?Sized>(
        &mut self,
        amount: usize,
        first_is_single: bool,
        rng: &mut R,
    ) -> bool {
        let overflow = self.shift_up(amount);
        let live = self.live_rows();
        let width = self.width;

        for k in 1..=amount.min(live) {
            let row = self.row_mut(live - k);
            row.fill(Cell::Block(PieceKind::Garbage));

            let first_hole = rng.gen_range(0..width);
            row[first_hole] = Cell::Empty;

            let double = (k % 2 == 1 && !first_is_single) || (k % 2 == 0 && first_is_single);
            if double {
                let offset = rng.gen_range(1..width);
                row[(first_hole + offset) % width] = Cell::Empty;
            }
        }

        overflow
    }

    /// Remove active-piece residue from every row
    pub fn clear_shape_cells(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_shape()) {
            *cell = Cell::Empty;
        }
    }

    /// End-of-round cleanup: drop shape residue and collapse full rows.
    ///
    /// Rows are scanned top to bottom; each full row pulls everything above
    /// it down by one and empties row 0. Returns the number of rows removed.
    pub fn clear_and_collapse(&mut self) -> u32 {
        let width = self.width;
        let mut removed = 0;

        for y in 0..self.height {
            for cell in self.row_mut(y) {
                if cell.is_shape() {
                    *cell = Cell::Empty;
                }
            }

            if !self.is_row_full(y) {
                continue;
            }

            // copy_within handles the overlapping ranges
            self.cells.copy_within(0..y * width, width);
            self.row_mut(0).fill(Cell::Empty);
            removed += 1;
        }

        removed
    }

    /// True when no placed or garbage block remains (solid rows don't count)
    pub fn is_cleared(&self) -> bool {
        !self.cells.iter().any(Cell::is_block)
    }

    /// Number of block cells, mostly useful for assertions and logs
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_block()).count()
    }

    /// Serialize the field for bots, the visualizer or logs
    pub fn render(&self, mode: RenderMode) -> String {
        let (cell_sep, row_sep) = match mode {
            RenderMode::Compact | RenderMode::Visualizer => (',', ';'),
            RenderMode::Pretty => (' ', '\n'),
        };

        let mut out = String::with_capacity(self.cells.len() * 2);
        for y in 0..self.height {
            if y > 0 {
                out.push(row_sep);
            }
            for (x, cell) in self.row(y).iter().enumerate() {
                if x > 0 {
                    out.push(cell_sep);
                }
                match (mode, cell.kind()) {
                    (RenderMode::Visualizer, Some(kind)) => out.push(kind.letter()),
                    _ => {
                        let _ = write!(out, "{}", cell.state().code());
                    }
                }
            }
        }
        out
    }

    /// Get a reference to the internal cells buffer
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
