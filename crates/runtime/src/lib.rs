//! Session runtime - hosting a board behind async channels
//!
//! The rules engine in `push-match-core` is synchronous and knows nothing
//! about time. This crate gives it a home on a tokio task so that input,
//! animation playback and persistence can live on other tasks:
//!
//! 1. **Session**: [`spawn_session`] moves a [`Board`](push_match_core::Board)
//!    onto its own task; requests arrive over a bounded channel and each one
//!    is answered on a oneshot
//! 2. **Outbound effects**: every effect is also streamed, in order, over an
//!    unbounded channel
//! 3. **Presenter**: [`InstantPresenter`] consumes that stream and
//!    acknowledges animations immediately (headless play and tests)
//! 4. **Journal**: optional JSON-lines record of every effect
//!
//! Configuration comes from [`SessionConfig::from_env`].

pub mod config;
pub mod error;
pub mod journal;
pub mod presenter;
pub mod session;

pub use config::SessionConfig;
pub use error::SessionError;
pub use journal::{Journal, JournalRecord};
pub use presenter::{InstantPresenter, PresenterStats};
pub use session::{spawn_session, Session, SessionHandle};
