//! Push-match (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as `push_match::{core, runtime, types}`.

pub use push_match_core as core;
pub use push_match_runtime as runtime;
pub use push_match_types as types;
