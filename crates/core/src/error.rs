use crate::types::{BoardState, Cell, PieceId};

/// Errors reported by the rules engine.
///
/// Everything except [`BoardError::InvalidDirection`] is recoverable: the
/// board is left exactly as it was before the rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("`Direct` has no spatial neighbour (queried from {cell})")]
    InvalidDirection { cell: Cell },

    #[error("no push path reaches the grabbed piece")]
    NoPathFound,

    #[error("there is no turn to undo")]
    EmptyUndo,

    #[error("hi-score rank {rank} is outside the {len}-entry table")]
    InvalidRank { rank: usize, len: usize },

    #[error("board is busy ({state:?}) and rejects input")]
    Busy { state: BoardState },

    #[error("no preview is armed")]
    NoPreview,

    #[error("piece {piece} is hardened")]
    HardenedPiece { piece: PieceId },

    #[error("piece {piece} is not on the grid")]
    PieceNotFound { piece: PieceId },

    #[error("a piece cannot be pushed into itself")]
    SamePiece,

    #[error("the level is over")]
    Finished,
}

impl BoardError {
    /// Stable machine-readable error code
    pub fn code(self) -> &'static str {
        match self {
            BoardError::InvalidDirection { .. } => "invalid_direction",
            BoardError::NoPathFound => "no_path_found",
            BoardError::EmptyUndo => "empty_undo",
            BoardError::InvalidRank { .. } => "invalid_rank",
            BoardError::Busy { .. } => "busy",
            BoardError::NoPreview => "no_preview",
            BoardError::HardenedPiece { .. }
            | BoardError::PieceNotFound { .. }
            | BoardError::SamePiece => "invalid_selection",
            BoardError::Finished => "finished",
        }
    }

    /// Whether the caller can simply carry on after this error
    pub fn is_recoverable(self) -> bool {
        !matches!(self, BoardError::InvalidDirection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = BoardError::InvalidRank { rank: 12, len: 10 };
        assert_eq!(
            err.to_string(),
            "hi-score rank 12 is outside the 10-entry table"
        );
        assert_eq!(
            BoardError::HardenedPiece { piece: PieceId(4) }.to_string(),
            "piece #4 is hardened"
        );
    }

    #[test]
    fn selection_errors_share_a_code() {
        assert_eq!(BoardError::SamePiece.code(), "invalid_selection");
        assert_eq!(
            BoardError::PieceNotFound { piece: PieceId(1) }.code(),
            "invalid_selection"
        );
        assert_eq!(BoardError::NoPathFound.code(), "no_path_found");
    }

    #[test]
    fn only_invalid_direction_is_fatal() {
        assert!(!BoardError::InvalidDirection { cell: Cell::new(0, 0) }.is_recoverable());
        assert!(BoardError::EmptyUndo.is_recoverable());
        assert!(BoardError::Busy { state: BoardState::Paused }.is_recoverable());
    }
}
