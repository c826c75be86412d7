//! Match detection - 4-connected flood fill over same-type pieces
//!
//! Every occupied cell is visited once per call, in row-major order. Each
//! unvisited cell seeds a depth-first flood fill that collects its connected
//! same-type component; components of [`MIN_MATCH`] or more pieces are match
//! groups. The visited map is local to the call, so groups from one scan are
//! always disjoint.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{Cell, PieceId, PieceType, PushDirection, BOARD_CELLS, MIN_MATCH};

/// One maximal run of same-type pieces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGroup {
    pub kind: PieceType,
    /// Member cells in flood-fill discovery order
    pub cells: Vec<Cell>,
    /// Member pieces, parallel to `cells`
    pub pieces: Vec<PieceId>,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Result of one detection pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub groups: Vec<MatchGroup>,
}

impl MatchResult {
    /// True when at least one group was found
    pub fn is_valid(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Total number of pieces across all groups
    pub fn piece_count(&self) -> usize {
        self.groups.iter().map(MatchGroup::len).sum()
    }
}

/// Scan the whole grid and return every match group
pub fn find_matches(grid: &Grid) -> MatchResult {
    let mut visited = [false; BOARD_CELLS];
    let mut result = MatchResult::default();

    for cell in Cell::all() {
        if visited[cell.index()] {
            continue;
        }
        let Some(kind) = grid.kind_at(cell) else {
            continue;
        };

        let component = flood_fill(grid, cell, kind, &mut visited);
        if component.len() >= MIN_MATCH {
            let mut group = MatchGroup {
                kind,
                cells: Vec::with_capacity(component.len()),
                pieces: Vec::with_capacity(component.len()),
            };
            for member in component {
                if let Some(id) = grid.get(member) {
                    group.cells.push(member);
                    group.pieces.push(id);
                }
            }
            result.groups.push(group);
        }
    }

    result
}

/// Collect the connected component of `kind` containing `seed`
///
/// Uses an explicit stack; neighbours are pushed so they pop in
/// up, right, down, left order.
fn flood_fill(
    grid: &Grid,
    seed: Cell,
    kind: PieceType,
    visited: &mut [bool; BOARD_CELLS],
) -> ArrayVec<Cell, BOARD_CELLS> {
    let mut component = ArrayVec::new();
    let mut stack: ArrayVec<Cell, BOARD_CELLS> = ArrayVec::new();

    visited[seed.index()] = true;
    stack.push(seed);

    while let Some(cell) = stack.pop() {
        component.push(cell);
        for dir in PushDirection::CARDINALS.iter().rev() {
            let Some(next) = cell.step(*dir) else {
                continue;
            };
            if visited[next.index()] || grid.kind_at(next) != Some(kind) {
                continue;
            }
            // Every cell is marked before it is pushed, so the stack never
            // holds more than 64 entries.
            visited[next.index()] = true;
            stack.push(next);
        }
    }

    component
}
