//! Hint search - find a push that clears something
//!
//! Candidates are every soft piece paired with each soft orthogonal
//! neighbour, tried with every preferred direction. Each resolved path is
//! applied to a scratch copy of the grid and kept if the copy has a match.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::matcher::find_matches;
use crate::path::{resolve_path, Path};
use crate::types::{Cell, PieceId, PushDirection};

/// A push worth making
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// Piece to grab
    pub place: PieceId,
    /// Piece to drop it on
    pub push: PieceId,
    pub direction: PushDirection,
    /// Pieces that would clear on the first pass
    pub cleared: usize,
}

/// First scoring push in row-major order, if any
pub fn find_scoring_push(grid: &Grid) -> Option<Hint> {
    candidates(grid).find(|hint| hint.cleared > 0)
}

/// The scoring push that clears the most pieces immediately
pub fn best_scoring_push(grid: &Grid) -> Option<Hint> {
    candidates(grid)
        .filter(|hint| hint.cleared > 0)
        .max_by_key(|hint| hint.cleared)
}

fn candidates(grid: &Grid) -> impl Iterator<Item = Hint> + '_ {
    grid.occupied()
        .filter(|(_, piece)| !piece.hardened)
        .flat_map(move |(cell, piece)| {
            PushDirection::CARDINALS
                .into_iter()
                .filter_map(move |toward| soft_neighbour(grid, cell, toward))
                .flat_map(move |place| {
                    PushDirection::CARDINALS
                        .into_iter()
                        .map(move |direction| (place, piece.id, direction))
                })
        })
        .filter_map(move |(place, push, direction)| evaluate(grid, place, push, direction))
}

fn soft_neighbour(grid: &Grid, cell: Cell, toward: PushDirection) -> Option<PieceId> {
    let next = cell.step(toward)?;
    grid.piece_at(next).filter(|p| !p.hardened).map(|p| p.id)
}

fn evaluate(grid: &Grid, place: PieceId, push: PieceId, direction: PushDirection) -> Option<Hint> {
    let path = resolve_path(grid, place, push, direction).ok()?;
    let cleared = cleared_after(grid, &path);
    Some(Hint {
        place,
        push,
        direction,
        cleared,
    })
}

/// Pieces matched on a scratch grid with `path` applied
fn cleared_after(grid: &Grid, path: &Path) -> usize {
    let mut scratch = grid.clone();
    for step in path.top_down() {
        scratch.set(step.to, Some(step.piece));
    }
    find_matches(&scratch).piece_count()
}
