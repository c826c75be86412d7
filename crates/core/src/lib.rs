//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the push-to-match puzzle. It has **no
//! dependencies** on rendering, audio, input devices or async runtimes:
//! the [`Board`] consumes [`BoardEvent`]s and answers with [`Effect`]s, and
//! the caller decides how those are shown.
//!
//! - **Deterministic**: all randomness flows through [`Randomizer`]; a seed
//!   reproduces a game exactly
//! - **Testable**: every phase can be driven synchronously by acknowledging
//!   animations by hand
//!
//! # Module Structure
//!
//! - [`grid`]: 8x8 cell array plus the piece arena
//! - [`matcher`]: flood-fill detection of runs of three or more
//! - [`path`]: depth-first push resolution with hardened walls
//! - [`turn`]: preview, execution and undo of pushes
//! - [`progression`]: scoring, moves, hardening, win and loss
//! - [`board`]: the phase state machine tying it all together
//! - [`config`]: board setup and the level curve
//! - [`hiscore`], [`snapshot`], [`hint`]: supporting features
//!
//! # Game Rules
//!
//! - Grab a piece and drop it on another; the dropped-on piece is pushed
//!   toward the grabbed piece's cell and the chain closes behind it
//! - Any 4-connected run of three or more same-type pieces clears
//! - A push that clears nothing is taken back and costs one of three moves
//! - Cleared cells refill from above, which may cascade
//! - Hardened pieces cannot be moved or pushed through; more appear as the
//!   level goes on
//!
//! # Example
//!
//! ```
//! use push_match_core::{Board, BoardConfig, BoardEvent, Effect};
//! use push_match_core::types::{BoardState, Cell, PushDirection};
//!
//! let mut board = Board::new(BoardConfig::default().with_seed(7));
//! let push = board.grid().get(Cell::new(3, 3)).unwrap();
//! let place = board.grid().get(Cell::new(4, 3)).unwrap();
//!
//! board
//!     .handle(BoardEvent::RequestPreview { place, push, direction: PushDirection::Right })
//!     .unwrap();
//! let mut effects = board.handle(BoardEvent::PerformMove).unwrap();
//! assert_eq!(board.state(), BoardState::Paused);
//!
//! // Play every animation to completion.
//! while let Some(piece) = effects
//!     .iter()
//!     .find(|e| e.awaits_completion())
//!     .and_then(Effect::piece)
//! {
//!     effects.retain(|e| !(e.awaits_completion() && e.piece() == Some(piece)));
//!     effects.extend(board.handle(BoardEvent::AnimationFinished { piece }).unwrap());
//! }
//! assert_eq!(board.state(), BoardState::Ready);
//! ```

pub mod barrier;
pub mod board;
pub mod config;
pub mod effect;
pub mod error;
pub mod grid;
pub mod hint;
pub mod hiscore;
pub mod matcher;
pub mod path;
pub mod progression;
pub mod rng;
pub mod snapshot;
pub mod turn;

pub use push_match_types as types;

// Re-export commonly used types for convenience
pub use barrier::CompletionBarrier;
pub use board::Board;
pub use config::{BoardConfig, LevelPlan};
pub use effect::{BoardEvent, Effect};
pub use error::BoardError;
pub use grid::{Grid, Piece};
pub use hint::{best_scoring_push, find_scoring_push, Hint};
pub use hiscore::{HiScoreEntry, HiScoreTable};
pub use matcher::{find_matches, MatchGroup, MatchResult};
pub use path::{resolve_path, Move, Path};
pub use progression::{award_points, Progression};
pub use rng::{Randomizer, SimpleRng};
pub use snapshot::BoardSnapshot;
pub use turn::{Turn, TurnManager};
