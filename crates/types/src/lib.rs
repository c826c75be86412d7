//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable in any
//! context (rules engine, session host, presentation collaborators).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed square grid:
//!
//! - **Columns**: 8 (indexed 0-7, increasing rightward)
//! - **Rows**: 8 (indexed 0-7, increasing downward)
//!
//! # Scoring and Progression Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_SCORE` | 2 | Exponent base for run size |
//! | `POINTS_UNIT` | 100 | Points for the smallest run (3 pieces) |
//! | `MIN_MATCH` | 3 | Smallest clearable run |
//! | `MAX_MOVES_LEFT` | 3 | Failed attempts allowed per turn |
//! | `HARDEN_CHANCE_DIVISOR` | 8192 | `turns² / 8192` hardening chance |
//! | `HARDEN_ATTEMPT_INTERVAL` | 10 | One hardening attempt per 10 turns |
//!
//! # Examples
//!
//! ```
//! use push_match_types::{Cell, PieceType, PushDirection, BOARD_SIZE};
//!
//! let kind = PieceType::from_str("blue").unwrap();
//! assert_eq!(kind, PieceType::Blue);
//!
//! assert_eq!(PushDirection::Up.rotate_cw(), PushDirection::Right);
//!
//! let cell = Cell::new(7, 0);
//! assert_eq!(cell.step(PushDirection::Right), None);
//! assert_eq!(BOARD_SIZE, 8);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board side length in cells (8 columns, 8 rows)
pub const BOARD_SIZE: u8 = 8;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Number of distinct piece types
pub const PIECE_TYPE_COUNT: u8 = 7;

/// Smallest run of same-type pieces that clears
pub const MIN_MATCH: usize = 3;

/// Exponent base: a run of `n` pieces pays `BASE_SCORE^(n - MIN_MATCH)` units
pub const BASE_SCORE: u32 = 2;

/// Points for one unit of score
pub const POINTS_UNIT: u32 = 100;

/// Failed attempts allowed before the game ends (restored after every completed turn)
pub const MAX_MOVES_LEFT: u32 = 3;

/// Divisor of the end-of-turn hardening chance (`turns² / divisor`)
pub const HARDEN_CHANCE_DIVISOR: f64 = 8192.0;

/// One hardening attempt is granted per this many completed turns
pub const HARDEN_ATTEMPT_INTERVAL: u32 = 10;

/// Fraction of a cell a previewed piece leans toward its destination
pub const PREVIEW_DISTANCE: f32 = 0.75;

/// Win threshold of the first level with no carried-over score
pub const DEFAULT_POINTS_TO_WIN: u32 = 11_000;

/// Number of entries kept in the high-score table
pub const HISCORE_ENTRIES: usize = 10;

/// The seven piece types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    White,
}

impl PieceType {
    /// All piece types in index order
    pub const ALL: [PieceType; PIECE_TYPE_COUNT as usize] = [
        PieceType::Red,
        PieceType::Orange,
        PieceType::Yellow,
        PieceType::Green,
        PieceType::Blue,
        PieceType::Purple,
        PieceType::White,
    ];

    /// Map an index to a piece type (wraps modulo 7)
    ///
    /// # Examples
    ///
    /// ```
    /// use push_match_types::PieceType;
    ///
    /// assert_eq!(PieceType::from_index(0), PieceType::Red);
    /// assert_eq!(PieceType::from_index(8), PieceType::Orange);
    /// ```
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % PIECE_TYPE_COUNT as u32) as usize]
    }

    /// Index of this type in [`PieceType::ALL`]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Parse a piece type from string (case-insensitive, full or three-letter form)
    ///
    /// # Examples
    ///
    /// ```
    /// use push_match_types::PieceType;
    ///
    /// assert_eq!(PieceType::from_str("RED"), Some(PieceType::Red));
    /// assert_eq!(PieceType::from_str("pur"), Some(PieceType::Purple));
    /// assert_eq!(PieceType::from_str("black"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" | "r" => Some(PieceType::Red),
            "orange" | "ora" | "o" => Some(PieceType::Orange),
            "yellow" | "yel" | "y" => Some(PieceType::Yellow),
            "green" | "gre" | "g" => Some(PieceType::Green),
            "blue" | "blu" | "b" => Some(PieceType::Blue),
            "purple" | "pur" | "p" => Some(PieceType::Purple),
            "white" | "whi" | "w" => Some(PieceType::White),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceType::Red => "red",
            PieceType::Orange => "orange",
            PieceType::Yellow => "yellow",
            PieceType::Green => "green",
            PieceType::Blue => "blue",
            PieceType::Purple => "purple",
            PieceType::White => "white",
        }
    }

    /// Single-character glyph, used by text dumps of the board
    pub fn glyph(&self) -> char {
        match self {
            PieceType::Red => 'R',
            PieceType::Orange => 'O',
            PieceType::Yellow => 'Y',
            PieceType::Green => 'G',
            PieceType::Blue => 'B',
            PieceType::Purple => 'P',
            PieceType::White => 'W',
        }
    }
}

/// Direction a piece is pushed on the board
///
/// The four cardinal directions are ordered clockwise starting at `Up`.
/// `Direct` is the special tag of the grabbed piece travelling straight to
/// the vacated cell; it has no spatial meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushDirection {
    Up,
    Right,
    Down,
    Left,
    Direct,
}

impl PushDirection {
    /// The four cardinal directions in clockwise order
    pub const CARDINALS: [PushDirection; 4] = [
        PushDirection::Up,
        PushDirection::Right,
        PushDirection::Down,
        PushDirection::Left,
    ];

    /// Clockwise index (Up = 0 .. Left = 3), `None` for `Direct`
    pub fn index(self) -> Option<u8> {
        match self {
            PushDirection::Up => Some(0),
            PushDirection::Right => Some(1),
            PushDirection::Down => Some(2),
            PushDirection::Left => Some(3),
            PushDirection::Direct => None,
        }
    }

    /// Whether this is one of the four spatial directions
    pub fn is_cardinal(self) -> bool {
        self != PushDirection::Direct
    }

    /// Rotate clockwise by 90°
    ///
    /// `Direct` has no orientation and is returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use push_match_types::PushDirection;
    ///
    /// assert_eq!(PushDirection::Left.rotate_cw(), PushDirection::Up);
    /// assert_eq!(PushDirection::Direct.rotate_cw(), PushDirection::Direct);
    /// ```
    pub fn rotate_cw(self) -> Self {
        match self {
            PushDirection::Up => PushDirection::Right,
            PushDirection::Right => PushDirection::Down,
            PushDirection::Down => PushDirection::Left,
            PushDirection::Left => PushDirection::Up,
            PushDirection::Direct => PushDirection::Direct,
        }
    }

    /// Column/row offset of one step in this direction
    pub fn delta(self) -> Option<(i8, i8)> {
        match self {
            PushDirection::Up => Some((0, -1)),
            PushDirection::Right => Some((1, 0)),
            PushDirection::Down => Some((0, 1)),
            PushDirection::Left => Some((-1, 0)),
            PushDirection::Direct => None,
        }
    }

    /// Recover a cardinal direction from a unit offset
    pub fn from_delta(dc: i8, dr: i8) -> Option<Self> {
        match (dc, dr) {
            (0, -1) => Some(PushDirection::Up),
            (1, 0) => Some(PushDirection::Right),
            (0, 1) => Some(PushDirection::Down),
            (-1, 0) => Some(PushDirection::Left),
            _ => None,
        }
    }

    /// Parse a direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(PushDirection::Up),
            "right" | "r" => Some(PushDirection::Right),
            "down" | "d" => Some(PushDirection::Down),
            "left" | "l" => Some(PushDirection::Left),
            "direct" => Some(PushDirection::Direct),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PushDirection::Up => "up",
            PushDirection::Right => "right",
            PushDirection::Down => "down",
            PushDirection::Left => "left",
            PushDirection::Direct => "direct",
        }
    }
}

/// A `(col, row)` coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: u8,
    pub row: u8,
}

impl Cell {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Build a cell from signed coordinates, `None` when off the board
    pub fn checked(col: i8, row: i8) -> Option<Self> {
        if col < 0 || row < 0 || col >= BOARD_SIZE as i8 || row >= BOARD_SIZE as i8 {
            return None;
        }
        Some(Self::new(col as u8, row as u8))
    }

    /// Flat row-major index (`row * 8 + col`)
    #[inline(always)]
    pub fn index(self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + (self.col as usize)
    }

    /// Inverse of [`Cell::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= BOARD_CELLS {
            return None;
        }
        let size = BOARD_SIZE as usize;
        Some(Self::new((index % size) as u8, (index / size) as u8))
    }

    /// The neighbouring cell one step in `dir`; `None` at the edge or for `Direct`
    pub fn step(self, dir: PushDirection) -> Option<Self> {
        let (dc, dr) = dir.delta()?;
        Self::checked(self.col as i8 + dc, self.row as i8 + dr)
    }

    /// All 64 cells in row-major order
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_CELLS).filter_map(Cell::from_index)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Stable handle of a piece owned by the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Phase of the board state machine
///
/// - **Ready**: idle, accepts new input
/// - **Paused**: a batch of pieces is animating, input is rejected
/// - **Checking**: the grid is being evaluated for matches
/// - **Refilling**: emptied cells are being filled from above
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardState {
    Ready,
    Paused,
    Checking,
    Refilling,
}

impl BoardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardState::Ready => "ready",
            BoardState::Paused => "paused",
            BoardState::Checking => "checking",
            BoardState::Refilling => "refilling",
        }
    }
}

/// How a level ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
    Lost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_constants() {
        assert_eq!(BOARD_SIZE, 8);
        assert_eq!(BOARD_CELLS, 64);
        assert_eq!(PieceType::ALL.len(), PIECE_TYPE_COUNT as usize);
        assert_eq!(MAX_MOVES_LEFT, 3);
    }

    #[test]
    fn cell_index_roundtrip_corners() {
        assert_eq!(Cell::new(0, 0).index(), 0);
        assert_eq!(Cell::new(7, 0).index(), 7);
        assert_eq!(Cell::new(0, 1).index(), 8);
        assert_eq!(Cell::new(7, 7).index(), 63);
        assert_eq!(Cell::from_index(63), Some(Cell::new(7, 7)));
        assert_eq!(Cell::from_index(64), None);
    }

    #[test]
    fn cell_step_respects_edges() {
        let corner = Cell::new(0, 0);
        assert_eq!(corner.step(PushDirection::Up), None);
        assert_eq!(corner.step(PushDirection::Left), None);
        assert_eq!(corner.step(PushDirection::Right), Some(Cell::new(1, 0)));
        assert_eq!(corner.step(PushDirection::Down), Some(Cell::new(0, 1)));
        assert_eq!(corner.step(PushDirection::Direct), None);
    }

    #[test]
    fn direction_clockwise_cycle() {
        let mut dir = PushDirection::Up;
        for expected in [
            PushDirection::Right,
            PushDirection::Down,
            PushDirection::Left,
            PushDirection::Up,
        ] {
            dir = dir.rotate_cw();
            assert_eq!(dir, expected);
        }
    }

    #[test]
    fn direction_from_delta() {
        for dir in PushDirection::CARDINALS {
            let (dc, dr) = dir.delta().unwrap();
            assert_eq!(PushDirection::from_delta(dc, dr), Some(dir));
        }
        assert_eq!(PushDirection::from_delta(1, 1), None);
    }

    #[test]
    fn piece_type_index_roundtrip() {
        for kind in PieceType::ALL {
            assert_eq!(PieceType::from_index(kind.index() as u32), kind);
            assert_eq!(PieceType::from_str(kind.as_str()), Some(kind));
        }
    }
}
