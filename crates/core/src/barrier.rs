use arrayvec::ArrayVec;

use crate::types::{PieceId, BOARD_CELLS};

/// Join point for one animation batch
///
/// Armed with the set of pieces the board is waiting on; each completion
/// removes one. The phase advances when the set drains. A piece is never
/// tracked twice, and at most one batch is outstanding, so 64 slots suffice.
#[derive(Debug, Clone, Default)]
pub struct CompletionBarrier {
    outstanding: ArrayVec<PieceId, BOARD_CELLS>,
}

impl CompletionBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start waiting on `pieces`, replacing any previous batch
    pub fn arm<I: IntoIterator<Item = PieceId>>(&mut self, pieces: I) {
        self.outstanding.clear();
        for piece in pieces {
            if !self.outstanding.contains(&piece) && !self.outstanding.is_full() {
                self.outstanding.push(piece);
            }
        }
    }

    /// Record that `piece` finished; false if it was not awaited
    pub fn complete(&mut self, piece: PieceId) -> bool {
        match self.outstanding.iter().position(|&p| p == piece) {
            Some(i) => {
                self.outstanding.swap_remove(i);
                true
            }
            None => false,
        }
    }

    pub fn is_drained(&self) -> bool {
        self.outstanding.is_empty()
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_after_every_piece() {
        let mut barrier = CompletionBarrier::new();
        barrier.arm([PieceId(1), PieceId(2), PieceId(3)]);
        assert_eq!(barrier.outstanding(), 3);

        assert!(barrier.complete(PieceId(2)));
        assert!(barrier.complete(PieceId(1)));
        assert!(!barrier.is_drained());
        assert!(barrier.complete(PieceId(3)));
        assert!(barrier.is_drained());
    }

    #[test]
    fn test_unknown_and_repeated_completions() {
        let mut barrier = CompletionBarrier::new();
        barrier.arm([PieceId(5), PieceId(5)]);
        assert_eq!(barrier.outstanding(), 1);
        assert!(!barrier.complete(PieceId(9)));
        assert!(barrier.complete(PieceId(5)));
        assert!(!barrier.complete(PieceId(5)));
    }

    #[test]
    fn test_empty_batch_is_drained() {
        let mut barrier = CompletionBarrier::new();
        barrier.arm(std::iter::empty());
        assert!(barrier.is_drained());
    }
}
