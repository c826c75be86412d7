//! Effects and events - everything that crosses the board's boundary
//!
//! [`BoardEvent`] is what the outside world may tell the board; [`Effect`]
//! is what the board asks of the outside world in return. Piece commands are
//! addressed by [`PieceId`]; the board waits for an
//! [`BoardEvent::AnimationFinished`] per piece after every `MoveTo` and
//! `Break` it issues.

use serde::{Deserialize, Serialize};

use crate::types::{BoardState, Cell, PieceId, PieceType, PushDirection};

/// Command or notification emitted by the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Animate `piece` into `cell`; completion is awaited
    MoveTo { piece: PieceId, cell: Cell },
    /// Lean `piece` toward `direction` by `distance` cells (preview only)
    PreviewMoveTo {
        piece: PieceId,
        direction: PushDirection,
        distance: f32,
    },
    /// Return `piece` from its preview lean
    RemovePreview { piece: PieceId },
    /// Play the break animation; completion is awaited
    Break { piece: PieceId },
    /// Restore a piece's normal appearance (sent before an undo move)
    Revive { piece: PieceId },
    /// A new piece exists; it enters `cell` from `rows_above` rows over the top
    Spawn {
        piece: PieceId,
        kind: PieceType,
        cell: Cell,
        rows_above: u8,
    },
    /// `piece` became hardened
    Harden { piece: PieceId },
    StateChanged { from: BoardState, to: BoardState },
    ScoreChanged { total: u32 },
    PointsAwarded { points: u32 },
    MovesLeftChanged { moves_left: u32 },
    WinConditionChanged { points_to_win: u32 },
    LevelWon,
    GameOver,
}

impl Effect {
    /// Piece addressed by this effect, if it is a piece command
    pub fn piece(&self) -> Option<PieceId> {
        match *self {
            Effect::MoveTo { piece, .. }
            | Effect::PreviewMoveTo { piece, .. }
            | Effect::RemovePreview { piece }
            | Effect::Break { piece }
            | Effect::Revive { piece }
            | Effect::Spawn { piece, .. }
            | Effect::Harden { piece } => Some(piece),
            _ => None,
        }
    }

    /// Whether the board waits for this piece to report completion
    pub fn awaits_completion(&self) -> bool {
        matches!(self, Effect::MoveTo { .. } | Effect::Break { .. })
    }
}

/// Inbound signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    /// Show the push of `push` toward `place`'s cell
    RequestPreview {
        place: PieceId,
        push: PieceId,
        direction: PushDirection,
    },
    CancelPreview,
    /// Commit the armed preview
    PerformMove,
    /// Take back the newest turn; in `Ready` every turn is already settled,
    /// so this always answers [`BoardError::EmptyUndo`](crate::BoardError::EmptyUndo)
    UndoLastTurn,
    /// A piece finished its `MoveTo` or `Break` animation
    AnimationFinished { piece: PieceId },
}
