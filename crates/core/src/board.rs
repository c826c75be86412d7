//! Board module - the phase state machine that drives a level
//!
//! The board owns the grid and reacts to [`BoardEvent`]s by returning the
//! [`Effect`]s the outside world must carry out. Whenever it issues a batch of
//! `MoveTo` or `Break` commands it pauses until every piece in the batch has
//! reported [`BoardEvent::AnimationFinished`], then advances:
//!
//! ```text
//! Ready --PerformMove--> Paused --moved--> Checking
//! Checking --no match--> Paused --undone--> Ready        (costs one move)
//! Checking --match-----> Paused --broken--> Refilling
//! Refilling -----------> Paused --filled--> Checking     (cascade)
//!                                       \-> Ready        (end of turn)
//! ```
//!
//! Input is only accepted in `Ready`; anything else is rejected with
//! [`BoardError::Busy`] and leaves the board untouched.

use tracing::{debug, trace, warn};

use crate::barrier::CompletionBarrier;
use crate::error::BoardError;
use crate::grid::Grid;
use crate::matcher::{find_matches, MatchResult};
use crate::path::{resolve_path, Path};
use crate::progression::Progression;
use crate::rng::{Randomizer, SimpleRng};
use crate::snapshot::BoardSnapshot;
use crate::turn::TurnManager;
use crate::types::{BoardState, Cell, Outcome, PieceId, PushDirection, BOARD_SIZE};
use crate::{BoardConfig, BoardEvent, Effect};

/// What the outstanding animation batch is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Idle,
    Execute,
    Undo,
    Break,
    Refill,
}

/// One level of play
pub struct Board<R: Randomizer = SimpleRng> {
    grid: Grid,
    turns: TurnManager,
    progression: Progression,
    rng: R,
    state: BoardState,
    barrier: CompletionBarrier,
    pending: Pending,
    /// A turn was executed and not undone; reaching Ready ends it
    turn_is_over: bool,
    level: u32,
}

impl Board<SimpleRng> {
    /// Generate a board seeded from `config.seed`
    pub fn new(config: BoardConfig) -> Self {
        let rng = SimpleRng::new(config.seed);
        Self::generate(config, rng)
    }
}

impl<R: Randomizer> Board<R> {
    /// Fill the grid with random pieces and re-roll every match away
    ///
    /// Afterwards `config.initial_hardened` pieces are hardened.
    pub fn generate(config: BoardConfig, mut rng: R) -> Self {
        let mut grid = Grid::new();
        for cell in Cell::all() {
            let id = grid.spawn(rng.next_kind());
            grid.set(cell, Some(id));
        }

        let mut rerolls = 0u32;
        loop {
            let result = find_matches(&grid);
            if !result.is_valid() {
                break;
            }
            for group in &result.groups {
                for &piece in &group.pieces {
                    grid.set_kind(piece, rng.next_kind());
                }
            }
            rerolls += 1;
        }
        debug!(rerolls, "board generated");

        let mut board = Self::assemble(grid, &config, rng);
        let initial = config.initial_hardened;
        board.progression.randomly_harden(
            &mut board.grid,
            &mut board.rng,
            initial,
            1.0,
            &mut Vec::new(),
        );
        board
    }

    /// Start from an existing grid; hardened pieces already on it are counted
    pub fn from_grid(grid: Grid, config: &BoardConfig, rng: R) -> Self {
        let mut board = Self::assemble(grid, config, rng);
        board.progression.recount_hardened(&board.grid);
        board
    }

    fn assemble(grid: Grid, config: &BoardConfig, rng: R) -> Self {
        Self {
            grid,
            turns: TurnManager::new(),
            progression: Progression::new(config),
            rng,
            state: BoardState::Ready,
            barrier: CompletionBarrier::new(),
            pending: Pending::Idle,
            turn_is_over: false,
            level: config.level,
        }
    }

    /// Describe the whole board so a presenter can build its scene
    ///
    /// Every piece is announced with a `Spawn` at its cell (hardened ones
    /// followed by `Harden`), then the score, threshold and moves.
    pub fn announce(&self) -> Vec<Effect> {
        let mut effects = Vec::new();
        for (cell, piece) in self.grid.occupied() {
            effects.push(Effect::Spawn {
                piece: piece.id,
                kind: piece.kind,
                cell,
                rows_above: 0,
            });
            if piece.hardened {
                effects.push(Effect::Harden { piece: piece.id });
            }
        }
        self.progression.announce(&mut effects);
        effects
    }

    /// Feed one event to the board
    pub fn handle(&mut self, event: BoardEvent) -> Result<Vec<Effect>, BoardError> {
        let mut effects = Vec::new();
        match event {
            BoardEvent::RequestPreview {
                place,
                push,
                direction,
            } => {
                self.accept_input()?;
                self.request_preview(place, push, direction, &mut effects)?;
            }
            BoardEvent::CancelPreview => {
                self.accept_input()?;
                self.turns.cancel_preview(&mut effects);
            }
            BoardEvent::PerformMove => {
                self.accept_input()?;
                self.perform_move(&mut effects)?;
            }
            BoardEvent::UndoLastTurn => {
                // Turns only stay open while the board is busy checking them.
                self.accept_input()?;
                return Err(BoardError::EmptyUndo);
            }
            BoardEvent::AnimationFinished { piece } => {
                self.animation_finished(piece, &mut effects);
            }
        }
        Ok(effects)
    }

    fn accept_input(&self) -> Result<(), BoardError> {
        if self.progression.is_finished() {
            return Err(BoardError::Finished);
        }
        if self.state != BoardState::Ready {
            return Err(BoardError::Busy { state: self.state });
        }
        Ok(())
    }

    fn request_preview(
        &mut self,
        place: PieceId,
        push: PieceId,
        direction: PushDirection,
        effects: &mut Vec<Effect>,
    ) -> Result<(), BoardError> {
        let path = resolve_path(&self.grid, place, push, direction)?;
        trace!(%place, %push, direction = direction.as_str(), moves = path.len(), "preview");
        self.turns.preview(path, effects);
        Ok(())
    }

    fn perform_move(&mut self, effects: &mut Vec<Effect>) -> Result<(), BoardError> {
        let path = self.turns.take_preview(effects)?;
        self.set_state(BoardState::Paused, effects);

        let turn = self.turns.execute(path, &mut self.grid, effects);
        self.barrier.arm(turn.pieces());
        self.pending = Pending::Execute;
        self.turn_is_over = true;

        self.advance_if_drained(effects);
        Ok(())
    }

    fn animation_finished(&mut self, piece: PieceId, effects: &mut Vec<Effect>) {
        if self.pending == Pending::Idle {
            warn!(%piece, "animation finished with no batch outstanding");
            return;
        }
        if !self.barrier.complete(piece) {
            warn!(%piece, "animation finished for a piece outside the batch");
            return;
        }
        trace!(%piece, remaining = self.barrier.outstanding(), "animation finished");
        self.advance_if_drained(effects);
    }

    /// Run phases for as long as batches complete immediately
    fn advance_if_drained(&mut self, effects: &mut Vec<Effect>) {
        while self.barrier.is_drained() {
            let pending = std::mem::replace(&mut self.pending, Pending::Idle);
            match pending {
                Pending::Idle => return,
                Pending::Execute => {
                    self.set_state(BoardState::Checking, effects);
                    self.check_matches(effects);
                }
                Pending::Undo => {
                    self.set_state(BoardState::Ready, effects);
                    self.progression.decrement_moves(effects);
                }
                Pending::Break => {
                    self.set_state(BoardState::Refilling, effects);
                    self.refill(effects);
                }
                Pending::Refill => self.settle(effects),
            }
        }
    }

    /// Checking phase: clear matches, or take the move back when there are none
    fn check_matches(&mut self, effects: &mut Vec<Effect>) {
        let result = find_matches(&self.grid);
        if !result.is_valid() {
            debug!("no match, undoing the turn");
            self.turn_is_over = false;
            self.set_state(BoardState::Paused, effects);
            match self.turns.undo_last(&mut self.grid, effects) {
                Ok(turn) => {
                    self.barrier.arm(turn.pieces());
                    self.pending = Pending::Undo;
                }
                Err(err) => {
                    warn!(%err, "checking found no match and no turn to undo");
                    self.set_state(BoardState::Ready, effects);
                }
            }
            return;
        }

        self.turns.commit();
        self.set_state(BoardState::Paused, effects);
        self.break_groups(&result, effects);
    }

    fn break_groups(&mut self, result: &MatchResult, effects: &mut Vec<Effect>) {
        let mut broken = Vec::with_capacity(result.piece_count());
        for (index, group) in result.groups.iter().enumerate() {
            let combo = index as u32 + 1;
            let points = self.progression.award(group.len(), combo, effects);
            debug!(kind = group.kind.as_str(), size = group.len(), combo, points, "group cleared");

            for &cell in &group.cells {
                let Some(piece) = self.grid.take(cell) else {
                    continue;
                };
                if piece.hardened {
                    self.progression.hardened_cleared();
                }
                effects.push(Effect::Break { piece: piece.id });
                broken.push(piece.id);
            }
        }
        self.barrier.arm(broken);
        self.pending = Pending::Break;
    }

    /// Refilling phase: let pieces fall into gaps and spawn new ones on top
    ///
    /// Columns are scanned bottom to top. An empty cell takes the nearest
    /// piece above it; with nothing left above, a new piece is spawned over
    /// the board, stacked one row higher per spawn in that column.
    fn refill(&mut self, effects: &mut Vec<Effect>) {
        self.set_state(BoardState::Paused, effects);

        let mut moving = Vec::new();
        for col in 0..BOARD_SIZE {
            let mut spawned: u8 = 0;
            for row in (0..BOARD_SIZE).rev() {
                let cell = Cell::new(col, row);
                if self.grid.get(cell).is_some() {
                    continue;
                }
                let above = (0..row)
                    .rev()
                    .find_map(|r| self.grid.get(Cell::new(col, r)));
                let piece = match above {
                    Some(piece) => piece,
                    None => {
                        let kind = self.rng.next_kind();
                        let piece = self.grid.spawn(kind);
                        spawned += 1;
                        effects.push(Effect::Spawn {
                            piece,
                            kind,
                            cell,
                            rows_above: spawned,
                        });
                        piece
                    }
                };
                self.grid.set(cell, Some(piece));
                effects.push(Effect::MoveTo { piece, cell });
                moving.push(piece);
            }
        }

        debug!(moving = moving.len(), "refill");
        self.barrier.arm(moving);
        self.pending = Pending::Refill;
    }

    /// The grid has settled after a refill: cascade or finish the turn
    fn settle(&mut self, effects: &mut Vec<Effect>) {
        if find_matches(&self.grid).is_valid() {
            debug!("cascade");
            self.set_state(BoardState::Checking, effects);
            self.check_matches(effects);
            return;
        }

        self.set_state(BoardState::Ready, effects);
        if self.turn_is_over {
            self.turn_is_over = false;
            let turns_taken = self.turns.turns_taken() as u32;
            self.progression
                .end_of_turn(&mut self.grid, &mut self.rng, turns_taken, effects);
        }
    }

    fn set_state(&mut self, to: BoardState, effects: &mut Vec<Effect>) {
        if self.state == to {
            return;
        }
        let from = self.state;
        self.state = to;
        debug!(from = from.as_str(), to = to.as_str(), "state");
        effects.push(Effect::StateChanged { from, to });
    }

    /// Win the level on the spot
    pub fn force_win(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.progression.win(&mut effects);
        effects
    }

    /// Lose the level on the spot
    pub fn force_game_over(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.progression.game_over(&mut effects);
        effects
    }

    /// Harden up to `count` random soft pieces
    pub fn harden_random(&mut self, count: u32) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.progression
            .randomly_harden(&mut self.grid, &mut self.rng, count, 1.0, &mut effects);
        effects
    }

    /// Configuration of the level that follows this one
    pub fn next_level_config(&self) -> BoardConfig {
        BoardConfig::for_level(self.level + 1, self.progression.score())
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(
            &self.grid,
            self.state,
            &self.progression,
            self.level,
            self.turns.turns_taken() as u32,
        )
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn moves_left(&self) -> u32 {
        self.progression.moves_left()
    }

    pub fn points_to_win(&self) -> u32 {
        self.progression.points_to_win()
    }

    pub fn hardened_count(&self) -> u32 {
        self.progression.hardened_count()
    }

    pub fn turns_taken(&self) -> usize {
        self.turns.turns_taken()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.progression.outcome()
    }

    pub fn is_finished(&self) -> bool {
        self.progression.is_finished()
    }

    /// The armed preview, if any
    pub fn preview(&self) -> Option<&Path> {
        self.turns.armed_preview()
    }

    /// Pieces the board is still waiting on
    pub fn outstanding(&self) -> usize {
        self.barrier.outstanding()
    }
}
