//! Turn module - previews, execution and undo of resolved pushes
//!
//! A [`Turn`] is a frozen copy of a [`Path`]. The [`TurnManager`] keeps the
//! history of executed turns for the life of the board; its length is the
//! number of turns taken. Only the newest turn, and only until the board has
//! confirmed that it produced a match, can be undone.

use crate::error::BoardError;
use crate::grid::Grid;
use crate::path::{Move, Path};
use crate::types::{PieceId, PREVIEW_DISTANCE};
use crate::Effect;

/// An executed push; the move list never changes after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Stack order: index 0 is the bottom, the last entry is applied first
    moves: Box<[Move]>,
}

impl Turn {
    fn new(path: Path) -> Self {
        Self {
            moves: path.into_moves().into_boxed_slice(),
        }
    }

    /// Moves in the order they were applied
    pub fn applied(&self) -> impl DoubleEndedIterator<Item = &Move> + '_ {
        self.moves.iter().rev()
    }

    /// Pieces that moved
    pub fn pieces(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.applied().map(|m| m.piece)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Owner of the preview and the turn history
#[derive(Debug, Default)]
pub struct TurnManager {
    history: Vec<Turn>,
    /// The newest turn has not been confirmed yet and may be undone
    open: bool,
    preview: Option<Path>,
}

impl TurnManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `path` without touching the grid
    ///
    /// Any earlier preview is removed first.
    pub fn preview(&mut self, path: Path, effects: &mut Vec<Effect>) {
        self.cancel_preview(effects);
        for step in path.top_down() {
            effects.push(Effect::PreviewMoveTo {
                piece: step.piece,
                direction: step.direction,
                distance: PREVIEW_DISTANCE,
            });
        }
        self.preview = Some(path);
    }

    /// Withdraw the current preview; a no-op when none is shown
    pub fn cancel_preview(&mut self, effects: &mut Vec<Effect>) -> bool {
        let Some(path) = self.preview.take() else {
            return false;
        };
        effects.extend(path.pieces().map(|piece| Effect::RemovePreview { piece }));
        true
    }

    pub fn armed_preview(&self) -> Option<&Path> {
        self.preview.as_ref()
    }

    /// Take the preview out for execution, issuing its `RemovePreview`s
    pub fn take_preview(&mut self, effects: &mut Vec<Effect>) -> Result<Path, BoardError> {
        let path = self.preview.take().ok_or(BoardError::NoPreview)?;
        effects.extend(path.pieces().map(|piece| Effect::RemovePreview { piece }));
        Ok(path)
    }

    /// Apply `path` to the grid and record it as the newest, undoable turn
    pub fn execute(&mut self, path: Path, grid: &mut Grid, effects: &mut Vec<Effect>) -> &Turn {
        let turn = Turn::new(path);
        for step in turn.applied() {
            grid.set(step.to, Some(step.piece));
            effects.push(Effect::MoveTo {
                piece: step.piece,
                cell: step.to,
            });
        }
        tracing::debug!(moves = turn.len(), "turn executed");
        self.open = true;
        self.history.push(turn);
        &self.history[self.history.len() - 1]
    }

    /// Revert the newest turn and drop it from the history
    ///
    /// Fails with [`BoardError::EmptyUndo`] when there is no turn, or the
    /// newest one has already been confirmed.
    pub fn undo_last(&mut self, grid: &mut Grid, effects: &mut Vec<Effect>) -> Result<Turn, BoardError> {
        if !self.open {
            return Err(BoardError::EmptyUndo);
        }
        let turn = self.history.pop().ok_or(BoardError::EmptyUndo)?;
        self.open = false;

        for step in turn.applied().rev() {
            grid.set(step.from, Some(step.piece));
            effects.push(Effect::Revive { piece: step.piece });
            effects.push(Effect::MoveTo {
                piece: step.piece,
                cell: step.from,
            });
        }
        tracing::debug!(moves = turn.len(), "turn undone");
        Ok(turn)
    }

    /// Confirm the newest turn; it can no longer be undone
    pub fn commit(&mut self) {
        self.open = false;
    }

    /// Number of turns that stand (executed and not undone)
    pub fn turns_taken(&self) -> usize {
        self.history.len()
    }
}
