//! Session host - runs a board on its own task
//!
//! The board itself is synchronous. A session moves it onto a tokio task
//! that owns it exclusively; callers talk to it through a cloneable
//! [`SessionHandle`] over a bounded request channel, and every effect the
//! board produces is also pushed, in order, onto an unbounded outbound
//! channel for presenters.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use push_match_core::types::{PieceId, BOARD_CELLS};
use push_match_core::{
    find_scoring_push, Board, BoardError, BoardEvent, BoardSnapshot, Effect, Hint, Randomizer,
};

use crate::error::SessionError;

enum Request {
    Event {
        event: BoardEvent,
        reply: oneshot::Sender<Result<Vec<Effect>, BoardError>>,
    },
    Snapshot {
        reply: oneshot::Sender<BoardSnapshot>,
    },
    Hint {
        reply: oneshot::Sender<Option<Hint>>,
    },
    Pieces {
        reply: oneshot::Sender<[Option<PieceId>; BOARD_CELLS]>,
    },
    Shutdown,
}

/// Cheap cloneable handle to a running session
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Request>,
}

impl SessionHandle {
    /// Feed one event to the board and wait for its effects
    pub async fn send(&self, event: BoardEvent) -> Result<Vec<Effect>, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Event { event, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        let effects = rx.await.map_err(|_| SessionError::Closed)??;
        Ok(effects)
    }

    pub async fn snapshot(&self) -> Result<BoardSnapshot, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Snapshot { reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Ask the board for a push that clears something
    pub async fn hint(&self) -> Result<Option<Hint>, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Hint { reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Piece handle in every cell, indexed by [`Cell::index`](push_match_core::types::Cell::index)
    pub async fn piece_ids(&self) -> Result<[Option<PieceId>; BOARD_CELLS], SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Pieces { reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Stop the session; the task hands the board back through its join handle
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.tx
            .send(Request::Shutdown)
            .await
            .map_err(|_| SessionError::Closed)
    }
}

/// A spawned session
pub struct Session<R: Randomizer> {
    pub handle: SessionHandle,
    /// Every effect, starting with the board's opening announcement
    pub effects: mpsc::UnboundedReceiver<Effect>,
    pub task: JoinHandle<Board<R>>,
}

/// Move `board` onto a new task
///
/// `max_pending` bounds the request channel (at least one slot).
pub fn spawn_session<R>(board: Board<R>, max_pending: usize) -> Session<R>
where
    R: Randomizer + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<Request>(max_pending.max(1));
    let (out_tx, out_rx) = mpsc::unbounded_channel::<Effect>();

    let task = tokio::spawn(run_session(board, rx, out_tx));

    Session {
        handle: SessionHandle { tx },
        effects: out_rx,
        task,
    }
}

async fn run_session<R: Randomizer>(
    mut board: Board<R>,
    mut rx: mpsc::Receiver<Request>,
    out_tx: mpsc::UnboundedSender<Effect>,
) -> Board<R> {
    tracing::debug!(level = board.level(), "session started");
    forward(&out_tx, board.announce());

    while let Some(request) = rx.recv().await {
        match request {
            Request::Event { event, reply } => {
                let result = board.handle(event);
                match &result {
                    Ok(effects) => forward(&out_tx, effects.iter().copied()),
                    Err(err) => tracing::debug!(code = err.code(), %err, "event rejected"),
                }
                let _ = reply.send(result);
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(board.snapshot());
            }
            Request::Hint { reply } => {
                let _ = reply.send(find_scoring_push(board.grid()));
            }
            Request::Pieces { reply } => {
                let _ = reply.send(*board.grid().cells());
            }
            Request::Shutdown => break,
        }
    }

    tracing::debug!(score = board.score(), turns = board.turns_taken(), "session stopped");
    board
}

fn forward<I: IntoIterator<Item = Effect>>(out_tx: &mpsc::UnboundedSender<Effect>, effects: I) {
    for effect in effects {
        // Receiver dropped: nobody is presenting.
        if out_tx.send(effect).is_err() {
            return;
        }
    }
}
