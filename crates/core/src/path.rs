//! Path resolution - which pieces move, and in what order, for a push
//!
//! The player grabs a piece and drops it onto another piece (the *start*),
//! leaning in a direction. The start piece is pushed along a chain of
//! neighbours that ends in the grabbed piece's vacated cell; the grabbed
//! piece then travels directly into the start cell.
//!
//! The chain is found with a depth-first search that prefers to keep going
//! in the current direction and otherwise turns clockwise. Hardened pieces
//! are walls. The search is a pure function of the grid and its arguments.

use crate::error::BoardError;
use crate::grid::Grid;
use crate::types::{Cell, PieceId, PushDirection, BOARD_CELLS};

/// One piece travelling from one cell to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Move {
    pub piece: PieceId,
    pub from: Cell,
    pub to: Cell,
    pub direction: PushDirection,
}

impl Move {
    /// A single-cell push; the direction is derived from the step.
    ///
    /// Returns `None` when `from` and `to` are not orthogonal neighbours.
    pub fn pushed(piece: PieceId, from: Cell, to: Cell) -> Option<Self> {
        let dc = to.col as i8 - from.col as i8;
        let dr = to.row as i8 - from.row as i8;
        let direction = PushDirection::from_delta(dc, dr)?;
        Some(Self {
            piece,
            from,
            to,
            direction,
        })
    }

    /// The grabbed piece going straight to the cell it was dropped on
    pub fn direct(piece: PieceId, from: Cell, to: Cell) -> Self {
        Self {
            piece,
            from,
            to,
            direction: PushDirection::Direct,
        }
    }
}

/// A resolved push, stored as a stack
///
/// Moves are pushed in discovery order (start piece first); the top of the
/// stack is the terminal `Direct` move. Applying a path walks it top to
/// bottom, so the grabbed piece leaves its cell before anything steps in.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Path {
    moves: Vec<Move>,
}

impl Path {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Moves from the top of the stack down (application order)
    pub fn top_down(&self) -> impl DoubleEndedIterator<Item = &Move> + '_ {
        self.moves.iter().rev()
    }

    /// The top move, which is always the grabbed piece's `Direct` move
    pub fn top(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Moves in discovery order (bottom of the stack first)
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub(crate) fn into_moves(self) -> Vec<Move> {
        self.moves
    }

    /// Pieces touched by this path, top down
    pub fn pieces(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.top_down().map(|m| m.piece)
    }
}

/// Resolve the push of `start` toward `grabbed`'s cell, preferring `direction`
///
/// Fails with [`BoardError::NoPathFound`] when hardened pieces or the board
/// edges cut the start piece off from the grabbed piece.
pub fn resolve_path(
    grid: &Grid,
    grabbed: PieceId,
    start: PieceId,
    direction: PushDirection,
) -> Result<Path, BoardError> {
    if grabbed == start {
        return Err(BoardError::SamePiece);
    }
    let destination = grid
        .index_of(grabbed)
        .ok_or(BoardError::PieceNotFound { piece: grabbed })?;
    let start_cell = grid
        .index_of(start)
        .ok_or(BoardError::PieceNotFound { piece: start })?;

    for (id, cell) in [(grabbed, destination), (start, start_cell)] {
        if grid.is_hardened_at(cell) {
            return Err(BoardError::HardenedPiece { piece: id });
        }
    }
    if !direction.is_cardinal() {
        return Err(BoardError::InvalidDirection { cell: start_cell });
    }

    let mut search = Search {
        grid,
        destination,
        marked: [false; BOARD_CELLS],
        moves: Vec::new(),
    };

    if !search.visit(start_cell, direction)? {
        return Err(BoardError::NoPathFound);
    }

    search
        .moves
        .push(Move::direct(grabbed, destination, start_cell));
    Ok(Path {
        moves: search.moves,
    })
}

struct Search<'a> {
    grid: &'a Grid,
    destination: Cell,
    marked: [bool; BOARD_CELLS],
    moves: Vec<Move>,
}

impl Search<'_> {
    /// Depth-first step from `cell`; true once the destination is reached
    fn visit(&mut self, cell: Cell, preferred: PushDirection) -> Result<bool, BoardError> {
        self.marked[cell.index()] = true;
        if cell == self.destination {
            return Ok(true);
        }
        let Some(piece) = self.grid.get(cell) else {
            return Ok(false);
        };

        let mut dir = preferred;
        for _ in 0..4 {
            if let Some(next) = self.grid.adjacent(cell, dir)? {
                if self.is_viable(next) {
                    if let Some(step) = Move::pushed(piece, cell, next) {
                        self.moves.push(step);
                        if self.visit(next, dir)? {
                            return Ok(true);
                        }
                        self.moves.pop();
                    }
                }
            }
            dir = dir.rotate_cw();
        }

        Ok(false)
    }

    fn is_viable(&self, cell: Cell) -> bool {
        if self.marked[cell.index()] {
            return false;
        }
        if cell == self.destination {
            return true;
        }
        matches!(self.grid.piece_at(cell), Some(p) if !p.hardened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::test_layouts::stripes;

    fn stripes_grid() -> Grid {
        Grid::from_kinds(stripes())
    }

    fn harden(grid: &mut Grid, cells: &[(u8, u8)]) {
        for &(col, row) in cells {
            let id = grid.get(Cell::new(col, row)).unwrap();
            grid.set_hardened(id, true);
        }
    }

    #[test]
    fn test_adjacent_push_is_a_swap() {
        let grid = stripes_grid();
        let start = grid.get(Cell::new(0, 0)).unwrap();
        let grabbed = grid.get(Cell::new(1, 0)).unwrap();

        let path = resolve_path(&grid, grabbed, start, PushDirection::Right).unwrap();
        assert_eq!(path.len(), 2);

        let top = path.top().unwrap();
        assert_eq!(top.direction, PushDirection::Direct);
        assert_eq!(top.piece, grabbed);
        assert_eq!(top.from, Cell::new(1, 0));
        assert_eq!(top.to, Cell::new(0, 0));

        let pushed = path.as_slice()[0];
        assert_eq!(pushed.piece, start);
        assert_eq!(pushed.direction, PushDirection::Right);
        assert_eq!(pushed.to, Cell::new(1, 0));
    }

    #[test]
    fn test_straight_line_preferred() {
        let grid = stripes_grid();
        let start = grid.get(Cell::new(1, 4)).unwrap();
        let grabbed = grid.get(Cell::new(5, 4)).unwrap();

        let path = resolve_path(&grid, grabbed, start, PushDirection::Right).unwrap();
        // Four single steps plus the direct move.
        assert_eq!(path.len(), 5);
        for step in &path.as_slice()[..4] {
            assert_eq!(step.direction, PushDirection::Right);
            assert_eq!(step.from.row, 4);
        }
    }

    #[test]
    fn test_turns_clockwise_at_the_edge() {
        let grid = stripes_grid();
        // Pushing right along the top row, but the grabbed piece is below-left.
        let start = grid.get(Cell::new(6, 0)).unwrap();
        let grabbed = grid.get(Cell::new(7, 1)).unwrap();

        let path = resolve_path(&grid, grabbed, start, PushDirection::Right).unwrap();
        let steps: Vec<_> = path.as_slice()[..path.len() - 1]
            .iter()
            .map(|m| m.direction)
            .collect();
        assert_eq!(steps, vec![PushDirection::Right, PushDirection::Down]);
    }

    #[test]
    fn test_routes_around_hardened_pieces() {
        let mut grid = stripes_grid();
        harden(&mut grid, &[(3, 3)]);
        let start = grid.get(Cell::new(2, 3)).unwrap();
        let grabbed = grid.get(Cell::new(4, 3)).unwrap();

        let path = resolve_path(&grid, grabbed, start, PushDirection::Right).unwrap();
        for step in path.as_slice() {
            assert!(!grid.is_hardened_at(step.from));
            assert_ne!(step.to, Cell::new(3, 3));
        }
        // Right is blocked, so the first step turns Down (clockwise).
        assert_eq!(path.as_slice()[0].direction, PushDirection::Down);
    }

    #[test]
    fn test_path_never_revisits_a_cell() {
        let mut grid = stripes_grid();
        harden(&mut grid, &[(2, 1), (2, 2), (2, 3), (4, 4), (5, 4)]);
        let start = grid.get(Cell::new(1, 2)).unwrap();
        let grabbed = grid.get(Cell::new(6, 6)).unwrap();

        let path = resolve_path(&grid, grabbed, start, PushDirection::Right).unwrap();
        let mut seen = Vec::new();
        for step in path.as_slice() {
            if step.direction == PushDirection::Direct {
                continue;
            }
            assert!(!seen.contains(&step.from), "revisited {}", step.from);
            seen.push(step.from);
            assert!(!grid.is_hardened_at(step.to) || step.to == Cell::new(6, 6));
        }
    }

    #[test]
    fn test_no_two_moves_share_a_destination() {
        let grid = stripes_grid();
        let start = grid.get(Cell::new(0, 7)).unwrap();
        let grabbed = grid.get(Cell::new(7, 0)).unwrap();

        let path = resolve_path(&grid, grabbed, start, PushDirection::Up).unwrap();
        let mut targets: Vec<_> = path.as_slice().iter().map(|m| m.to).collect();
        targets.sort();
        targets.dedup();
        assert_eq!(targets.len(), path.len());
    }

    #[test]
    fn test_boxed_in_start_has_no_path() {
        let mut grid = stripes_grid();
        // Wall off (3,3) on all four sides.
        harden(&mut grid, &[(3, 2), (4, 3), (3, 4), (2, 3)]);
        let start = grid.get(Cell::new(3, 3)).unwrap();
        let grabbed = grid.get(Cell::new(6, 6)).unwrap();
        let before = grid.clone();

        for dir in PushDirection::CARDINALS {
            assert_eq!(
                resolve_path(&grid, grabbed, start, dir),
                Err(BoardError::NoPathFound)
            );
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn test_rejects_hardened_and_same_piece() {
        let mut grid = stripes_grid();
        harden(&mut grid, &[(0, 0)]);
        let hard = grid.get(Cell::new(0, 0)).unwrap();
        let soft = grid.get(Cell::new(1, 0)).unwrap();

        assert_eq!(
            resolve_path(&grid, hard, soft, PushDirection::Left),
            Err(BoardError::HardenedPiece { piece: hard })
        );
        assert_eq!(
            resolve_path(&grid, soft, hard, PushDirection::Right),
            Err(BoardError::HardenedPiece { piece: hard })
        );
        assert_eq!(
            resolve_path(&grid, soft, soft, PushDirection::Right),
            Err(BoardError::SamePiece)
        );
    }

    #[test]
    fn test_rejects_direct_and_unknown_pieces() {
        let grid = stripes_grid();
        let a = grid.get(Cell::new(0, 0)).unwrap();
        let b = grid.get(Cell::new(1, 0)).unwrap();
        assert_eq!(
            resolve_path(&grid, a, b, PushDirection::Direct),
            Err(BoardError::InvalidDirection {
                cell: Cell::new(1, 0)
            })
        );
        assert_eq!(
            resolve_path(&grid, PieceId(4242), b, PushDirection::Up),
            Err(BoardError::PieceNotFound {
                piece: PieceId(4242)
            })
        );
    }

    #[test]
    fn test_pushed_requires_unit_step() {
        let id = PieceId(1);
        assert!(Move::pushed(id, Cell::new(0, 0), Cell::new(2, 0)).is_none());
        assert!(Move::pushed(id, Cell::new(0, 0), Cell::new(1, 1)).is_none());
        assert_eq!(
            Move::pushed(id, Cell::new(3, 3), Cell::new(3, 2)).map(|m| m.direction),
            Some(PushDirection::Up)
        );
    }
}
