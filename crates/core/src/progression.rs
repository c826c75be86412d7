//! Scoring and progression - points, moves, hardening and level outcome
//!
//! Scoring rules:
//! - A cleared group of `n` pieces pays `2^(n-3) * 100` points, so a plain
//!   run of three is worth 100
//! - Within one clearing pass the k-th group (1-based) is multiplied by k
//! - Each cascade pass starts its multiplier over at 1
//!
//! Difficulty rises with the number of turns taken: after turn `t` the board
//! makes `t / 10` hardening attempts, each succeeding with chance `t² / 8192`.
//! A board with 63 hardened pieces is lost.

use crate::grid::Grid;
use crate::rng::Randomizer;
use crate::types::{
    Outcome, PieceId, BASE_SCORE, BOARD_CELLS, HARDEN_ATTEMPT_INTERVAL, HARDEN_CHANCE_DIVISOR,
    MIN_MATCH, POINTS_UNIT,
};
use crate::{BoardConfig, Effect};

/// Hardened pieces at which the level is lost
pub const HARDENED_LIMIT: u32 = BOARD_CELLS as u32 - 1;

/// Points for clearing a group of `size` pieces as the `combo`-th group of a pass
///
/// # Examples
///
/// ```
/// use push_match_core::award_points;
///
/// assert_eq!(award_points(3, 1), 100);
/// assert_eq!(award_points(4, 1), 200);
/// assert_eq!(award_points(4, 2), 400);
/// ```
pub fn award_points(size: usize, combo: u32) -> u32 {
    if size < MIN_MATCH {
        return 0;
    }
    let exponent = u32::try_from(size - MIN_MATCH).unwrap_or(u32::MAX);
    BASE_SCORE
        .saturating_pow(exponent)
        .saturating_mul(POINTS_UNIT)
        .saturating_mul(combo)
}

/// Hardening chance after `turns_taken` turns
pub fn harden_chance(turns_taken: u32) -> f64 {
    let t = turns_taken as f64;
    t * t / HARDEN_CHANCE_DIVISOR
}

/// Hardening attempts after `turns_taken` turns
pub fn harden_attempts(turns_taken: u32) -> u32 {
    turns_taken / HARDEN_ATTEMPT_INTERVAL
}

/// Uniformly random soft piece on the grid
///
/// A random cell is tried first; when it is empty or already hardened the
/// pick falls back to a uniform choice among the soft pieces. Both stages
/// together are uniform over the soft pieces.
fn pick_soft<R: Randomizer + ?Sized>(grid: &Grid, rng: &mut R) -> Option<PieceId> {
    if let Some(piece) = grid.piece_at(rng.next_cell()).filter(|p| !p.hardened) {
        return Some(piece.id);
    }
    let soft: Vec<PieceId> = grid
        .occupied()
        .filter(|(_, p)| !p.hardened)
        .map(|(_, p)| p.id)
        .collect();
    if soft.is_empty() {
        return None;
    }
    soft.get(rng.next_range(soft.len() as u32) as usize).copied()
}

/// Score, moves and difficulty of the level in play
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    score: u32,
    moves_left: u32,
    max_moves_left: u32,
    points_to_win: u32,
    hardened_count: u32,
    outcome: Option<Outcome>,
}

impl Progression {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            score: config.starting_score,
            moves_left: config.max_moves_left,
            max_moves_left: config.max_moves_left,
            points_to_win: config.points_to_win,
            hardened_count: 0,
            outcome: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn points_to_win(&self) -> u32 {
        self.points_to_win
    }

    pub fn hardened_count(&self) -> u32 {
        self.hardened_count
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Emit the current values so observers can initialise their displays
    pub fn announce(&self, effects: &mut Vec<Effect>) {
        effects.push(Effect::WinConditionChanged {
            points_to_win: self.points_to_win,
        });
        effects.push(Effect::ScoreChanged { total: self.score });
        effects.push(Effect::MovesLeftChanged {
            moves_left: self.moves_left,
        });
    }

    /// Award one cleared group and return the points
    pub fn award(&mut self, size: usize, combo: u32, effects: &mut Vec<Effect>) -> u32 {
        let points = award_points(size, combo);
        self.add_points(points, effects);
        points
    }

    pub fn add_points(&mut self, points: u32, effects: &mut Vec<Effect>) {
        self.score = self.score.saturating_add(points);
        effects.push(Effect::PointsAwarded { points });
        effects.push(Effect::ScoreChanged { total: self.score });
    }

    /// Spend one move; running out ends the game
    pub fn decrement_moves(&mut self, effects: &mut Vec<Effect>) {
        self.moves_left = self.moves_left.saturating_sub(1);
        effects.push(Effect::MovesLeftChanged {
            moves_left: self.moves_left,
        });
        if self.moves_left == 0 {
            self.game_over(effects);
        }
    }

    pub fn reset_moves(&mut self, effects: &mut Vec<Effect>) {
        self.moves_left = self.max_moves_left;
        effects.push(Effect::MovesLeftChanged {
            moves_left: self.moves_left,
        });
    }

    /// Take the hardened count from the grid (boards built from a layout)
    pub fn recount_hardened(&mut self, grid: &Grid) {
        self.hardened_count = grid.hardened_count() as u32;
    }

    /// A hardened piece was cleared by a match
    pub fn hardened_cleared(&mut self) {
        self.hardened_count = self.hardened_count.saturating_sub(1);
    }

    /// Make up to `max_count` hardening attempts, each succeeding with `chance`
    ///
    /// A successful roll always hardens a soft piece, picked uniformly.
    /// Stops early once no soft piece is left. Returns the number of pieces
    /// hardened.
    pub fn randomly_harden<R: Randomizer + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        max_count: u32,
        chance: f64,
        effects: &mut Vec<Effect>,
    ) -> u32 {
        let mut hardened = 0;
        let mut attempts = 0;
        while attempts < max_count {
            if rng.next_unit() >= chance {
                attempts += 1;
                continue;
            }
            let Some(piece) = pick_soft(grid, rng) else {
                break;
            };
            grid.set_hardened(piece, true);
            effects.push(Effect::Harden { piece });
            self.hardened_count += 1;
            hardened += 1;
            attempts += 1;
        }
        if hardened > 0 {
            tracing::debug!(hardened, total = self.hardened_count, "pieces hardened");
        }
        hardened
    }

    /// Bookkeeping when the board settles after a completed turn
    pub fn end_of_turn<R: Randomizer + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        turns_taken: u32,
        effects: &mut Vec<Effect>,
    ) {
        self.reset_moves(effects);
        self.randomly_harden(
            grid,
            rng,
            harden_attempts(turns_taken),
            harden_chance(turns_taken),
            effects,
        );
        self.check_game_end(effects);
    }

    /// Win when the threshold is reached, otherwise lose on a nearly frozen board
    pub fn check_game_end(&mut self, effects: &mut Vec<Effect>) {
        if self.score >= self.points_to_win {
            self.win(effects);
        } else if self.hardened_count >= HARDENED_LIMIT {
            self.game_over(effects);
        }
    }

    pub fn win(&mut self, effects: &mut Vec<Effect>) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(Outcome::Won);
        tracing::info!(score = self.score, "level won");
        effects.push(Effect::LevelWon);
    }

    /// Lose the level; fires at most once
    pub fn game_over(&mut self, effects: &mut Vec<Effect>) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(Outcome::Lost);
        tracing::info!(score = self.score, "game over");
        effects.push(Effect::GameOver);
    }
}
