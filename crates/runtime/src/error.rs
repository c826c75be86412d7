use push_match_core::BoardError;

/// Errors surfaced by a session handle
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The board rejected the request
    #[error(transparent)]
    Board(#[from] BoardError),

    /// The session task has stopped
    #[error("session closed")]
    Closed,
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::Board(err) => err.code(),
            SessionError::Closed => "session_closed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_errors_keep_their_code() {
        let err = SessionError::from(BoardError::NoPathFound);
        assert_eq!(err.code(), "no_path_found");
        assert_eq!(err.to_string(), "no push path reaches the grabbed piece");
        assert_eq!(SessionError::Closed.code(), "session_closed");
    }
}
