//! Board configuration and level progression

use crate::types::{DEFAULT_POINTS_TO_WIN, MAX_MOVES_LEFT};

/// Parameters of one level, derived from its number and the carried score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPlan {
    pub level: u32,
    pub points_to_win: u32,
    pub hard_pieces: u32,
    pub starting_score: u32,
}

impl LevelPlan {
    /// Plan level `level` (1-based) for a player arriving with `previous_score`
    ///
    /// The threshold grows with `level^1.5 * 10000` on top of the carried
    /// score and is rounded down to a whole thousand; every level after the
    /// first starts with two more hardened pieces.
    ///
    /// # Examples
    ///
    /// ```
    /// use push_match_core::LevelPlan;
    ///
    /// let first = LevelPlan::for_level(1, 0);
    /// assert_eq!(first.points_to_win, 11_000);
    /// assert_eq!(first.hard_pieces, 0);
    /// ```
    pub fn for_level(level: u32, previous_score: u32) -> Self {
        let x = (level as f64).powf(1.5) * 10_000.0 + previous_score as f64;
        let raw = if x >= 500.0 { x + 1000.0 } else { x - x % 1000.0 };
        let mut points_to_win = raw as u32;
        points_to_win -= points_to_win % 1000;

        Self {
            level,
            points_to_win,
            hard_pieces: level.saturating_sub(1) * 2,
            starting_score: previous_score,
        }
    }

    /// The plan that follows this one once it has been won with `final_score`
    pub fn next(&self, final_score: u32) -> Self {
        Self::for_level(self.level + 1, final_score)
    }
}

/// Everything needed to set up a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub level: u32,
    pub points_to_win: u32,
    /// Pieces hardened when the board is generated
    pub initial_hardened: u32,
    pub starting_score: u32,
    /// Failed attempts allowed per turn
    pub max_moves_left: u32,
    pub seed: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            level: 1,
            points_to_win: DEFAULT_POINTS_TO_WIN,
            initial_hardened: 0,
            starting_score: 0,
            max_moves_left: MAX_MOVES_LEFT,
            seed: 1,
        }
    }
}

impl From<LevelPlan> for BoardConfig {
    fn from(plan: LevelPlan) -> Self {
        Self {
            level: plan.level,
            points_to_win: plan.points_to_win,
            initial_hardened: plan.hard_pieces,
            starting_score: plan.starting_score,
            ..Self::default()
        }
    }
}

impl BoardConfig {
    pub fn for_level(level: u32, previous_score: u32) -> Self {
        LevelPlan::for_level(level, previous_score).into()
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Create from environment variables
    ///
    /// `PUSH_MATCH_LEVEL` and `PUSH_MATCH_START_SCORE` select the level plan;
    /// `PUSH_MATCH_SEED` and `PUSH_MATCH_MAX_MOVES` override the defaults.
    /// Unset or unparsable values fall back silently.
    pub fn from_env() -> Self {
        use std::env;

        fn parsed(key: &str) -> Option<u32> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let level = parsed("PUSH_MATCH_LEVEL").filter(|&l| l >= 1).unwrap_or(1);
        let starting_score = parsed("PUSH_MATCH_START_SCORE").unwrap_or(0);
        let mut config = Self::for_level(level, starting_score);

        if let Some(seed) = parsed("PUSH_MATCH_SEED") {
            config.seed = seed;
        }
        if let Some(moves) = parsed("PUSH_MATCH_MAX_MOVES").filter(|&m| m >= 1) {
            config.max_moves_left = moves;
        }
        config
    }
}
