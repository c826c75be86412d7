//! Grid module - piece storage and indexing
//!
//! The grid is an 8x8 board where each cell is empty or holds the handle of
//! one piece. Cells live in a flat row-major array; piece data (type and
//! hardened flag) lives in an arena keyed by [`PieceId`], so a piece that is
//! momentarily lifted off the board during a turn keeps its identity.
//!
//! Coordinates: (col, row) where col ranges 0..7 (left to right), row ranges
//! 0..7 (top to bottom).

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::types::{Cell, PieceId, PieceType, PushDirection, BOARD_CELLS, BOARD_SIZE};

/// A piece owned by the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceType,
    pub hardened: bool,
}

/// The 8x8 board of piece handles plus the arena that owns the pieces
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Option<PieceId>; BOARD_CELLS],
    pieces: HashMap<PieceId, Piece>,
    next_id: u32,
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
            pieces: HashMap::new(),
            next_id: 0,
        }
    }

    /// Build a full grid from a row-major layout (`rows[row][col]`)
    pub fn from_kinds(rows: [[PieceType; BOARD_SIZE as usize]; BOARD_SIZE as usize]) -> Self {
        let mut grid = Self::new();
        for (row, kinds) in rows.iter().enumerate() {
            for (col, &kind) in kinds.iter().enumerate() {
                let id = grid.spawn(kind);
                grid.set(Cell::new(col as u8, row as u8), Some(id));
            }
        }
        grid
    }

    /// Create a piece in the arena; it is not placed on any cell yet
    pub fn spawn(&mut self, kind: PieceType) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pieces.insert(
            id,
            Piece {
                id,
                kind,
                hardened: false,
            },
        );
        id
    }

    /// Handle of the piece at `cell`
    pub fn get(&self, cell: Cell) -> Option<PieceId> {
        self.cells[cell.index()]
    }

    /// Piece data by handle, whether or not it is currently on a cell
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    /// Piece data at `cell`
    pub fn piece_at(&self, cell: Cell) -> Option<&Piece> {
        self.get(cell).and_then(|id| self.pieces.get(&id))
    }

    pub fn kind_at(&self, cell: Cell) -> Option<PieceType> {
        self.piece_at(cell).map(|p| p.kind)
    }

    pub fn is_hardened_at(&self, cell: Cell) -> bool {
        self.piece_at(cell).map(|p| p.hardened).unwrap_or(false)
    }

    /// Place `piece` at `cell` (or clear it with `None`)
    ///
    /// A piece already on the grid elsewhere is lifted from its old cell
    /// first, so a handle never occupies two cells. A piece that was sitting
    /// on `cell` is displaced off the grid but stays in the arena.
    pub fn set(&mut self, cell: Cell, piece: Option<PieceId>) {
        if let Some(id) = piece {
            if let Some(previous) = self.index_of(id) {
                if previous != cell {
                    self.cells[previous.index()] = None;
                }
            }
        }
        self.cells[cell.index()] = piece;
    }

    /// Cell currently holding `piece`; `None` when it is off the grid
    pub fn index_of(&self, piece: PieceId) -> Option<Cell> {
        self.cells
            .iter()
            .position(|&c| c == Some(piece))
            .and_then(Cell::from_index)
    }

    /// Neighbour of `cell` in `dir`, `None` at the board edge
    ///
    /// `Direct` has no spatial meaning and is rejected.
    pub fn adjacent(&self, cell: Cell, dir: PushDirection) -> Result<Option<Cell>, BoardError> {
        if !dir.is_cardinal() {
            tracing::error!(%cell, "adjacency queried with the Direct tag");
            return Err(BoardError::InvalidDirection { cell });
        }
        Ok(cell.step(dir))
    }

    /// Reassign the type of a piece
    pub fn set_kind(&mut self, piece: PieceId, kind: PieceType) -> bool {
        match self.pieces.get_mut(&piece) {
            Some(p) => {
                p.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Set the hardened flag; returns true if the flag changed
    pub fn set_hardened(&mut self, piece: PieceId, hardened: bool) -> bool {
        match self.pieces.get_mut(&piece) {
            Some(p) if p.hardened != hardened => {
                p.hardened = hardened;
                true
            }
            _ => false,
        }
    }

    /// Clear `cell` and destroy the piece that was there
    pub fn take(&mut self, cell: Cell) -> Option<Piece> {
        let id = self.cells[cell.index()].take()?;
        self.pieces.remove(&id)
    }

    /// Raw cell array, row-major
    pub fn cells(&self) -> &[Option<PieceId>; BOARD_CELLS] {
        &self.cells
    }

    /// All placed pieces with their cells, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, &Piece)> + '_ {
        Cell::all().filter_map(move |cell| self.piece_at(cell).map(|p| (cell, p)))
    }

    /// Number of hardened pieces currently on the grid
    pub fn hardened_count(&self) -> usize {
        self.occupied().filter(|(_, p)| p.hardened).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Text dump: one line per row, upper-case glyph per piece, lower-case when
/// hardened, `.` for an empty cell
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let glyph = match self.piece_at(Cell::new(col, row)) {
                    Some(p) if p.hardened => p.kind.glyph().to_ascii_lowercase(),
                    Some(p) => p.kind.glyph(),
                    None => '.',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
