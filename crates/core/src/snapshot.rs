use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::progression::Progression;
use crate::types::{BoardState, Cell, Outcome, PieceType, BOARD_SIZE};

const SIDE: usize = BOARD_SIZE as usize;

/// Plain copy of the visible board, suitable for journaling or saving
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// `kinds[row][col]`, `None` for an empty cell
    pub kinds: [[Option<PieceType>; SIDE]; SIDE],
    pub hardened: [[bool; SIDE]; SIDE],
    pub state: BoardState,
    pub score: u32,
    pub moves_left: u32,
    pub points_to_win: u32,
    pub hardened_count: u32,
    pub level: u32,
    pub turns_taken: u32,
    pub outcome: Option<Outcome>,
}

impl BoardSnapshot {
    pub fn capture(
        grid: &Grid,
        state: BoardState,
        progression: &Progression,
        level: u32,
        turns_taken: u32,
    ) -> Self {
        let mut kinds = [[None; SIDE]; SIDE];
        let mut hardened = [[false; SIDE]; SIDE];
        for (cell, piece) in grid.occupied() {
            kinds[cell.row as usize][cell.col as usize] = Some(piece.kind);
            hardened[cell.row as usize][cell.col as usize] = piece.hardened;
        }

        Self {
            kinds,
            hardened,
            state,
            score: progression.score(),
            moves_left: progression.moves_left(),
            points_to_win: progression.points_to_win(),
            hardened_count: progression.hardened_count(),
            level,
            turns_taken,
            outcome: progression.outcome(),
        }
    }

    pub fn kind_at(&self, cell: Cell) -> Option<PieceType> {
        self.kinds[cell.row as usize][cell.col as usize]
    }

    /// Rebuild a grid with fresh piece handles
    pub fn to_grid(&self) -> Grid {
        let mut grid = Grid::new();
        for cell in Cell::all() {
            if let Some(kind) = self.kind_at(cell) {
                let id = grid.spawn(kind);
                grid.set(cell, Some(id));
                if self.hardened[cell.row as usize][cell.col as usize] {
                    grid.set_hardened(id, true);
                }
            }
        }
        grid
    }
}
