//! Instant presenter - plays every animation in zero time
//!
//! Stands in for a renderer: it reads the session's outbound effects,
//! acknowledges each `MoveTo` and `Break` straight away, journals effects
//! when asked to, and reports every time the board comes to rest.

use tokio::sync::mpsc;

use push_match_core::types::{BoardState, PieceId};
use push_match_core::{BoardError, BoardEvent, Effect};

use crate::error::SessionError;
use crate::journal::Journal;
use crate::session::SessionHandle;

/// What the presenter saw over its lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresenterStats {
    pub effects: u64,
    pub acknowledged: u64,
    pub points_awarded: u64,
}

pub struct InstantPresenter {
    handle: SessionHandle,
    effects: mpsc::UnboundedReceiver<Effect>,
    journal: Option<Journal>,
    settled_tx: mpsc::UnboundedSender<()>,
}

impl InstantPresenter {
    /// Returns the presenter and a receiver that yields once per return to `Ready`
    pub fn new(
        handle: SessionHandle,
        effects: mpsc::UnboundedReceiver<Effect>,
        journal: Option<Journal>,
    ) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        (
            Self {
                handle,
                effects,
                journal,
                settled_tx,
            },
            settled_rx,
        )
    }

    /// Run until the session's outbound channel closes
    pub async fn run(mut self) -> Result<PresenterStats, SessionError> {
        let mut stats = PresenterStats::default();

        while let Some(effect) = self.effects.recv().await {
            let journal_stopped = self
                .journal
                .as_ref()
                .is_some_and(|journal| !journal.record(stats.effects, effect));
            if journal_stopped {
                tracing::warn!("journal writer stopped");
                self.journal = None;
            }
            stats.effects += 1;

            match effect {
                Effect::MoveTo { piece, .. } | Effect::Break { piece } => {
                    self.acknowledge(piece).await?;
                    stats.acknowledged += 1;
                }
                Effect::PointsAwarded { points } => {
                    stats.points_awarded += points as u64;
                }
                Effect::StateChanged {
                    to: BoardState::Ready,
                    ..
                } => {
                    let _ = self.settled_tx.send(());
                }
                Effect::LevelWon => tracing::info!("level won"),
                Effect::GameOver => tracing::info!("game over"),
                _ => {}
            }
        }

        Ok(stats)
    }

    async fn acknowledge(&self, piece: PieceId) -> Result<(), SessionError> {
        match self.handle.send(BoardEvent::AnimationFinished { piece }).await {
            Ok(_) => Ok(()),
            // The board already moved past this batch.
            Err(SessionError::Board(BoardError::Finished)) => Ok(()),
            Err(SessionError::Closed) => {
                tracing::debug!(%piece, "session closed before acknowledgement");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
