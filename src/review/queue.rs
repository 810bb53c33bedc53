//! Ordered queue of cards pending in the active session

use std::collections::{HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::flashcards::CardId;

/// Remaining cards of a session, head first.
///
/// The queue does not look at due dates: a session covers its whole
/// population. It is only ever shortened from the front and is replaced
/// wholesale when a new session starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionQueue {
    pending: VecDeque<CardId>,
}

impl SessionQueue {
    /// Shuffled queue over every card in the deck
    pub fn initialize_full(ids: impl IntoIterator<Item = CardId>) -> Self {
        Self::shuffled(ids, &mut rand::thread_rng())
    }

    /// Shuffled queue over the cards rated hard in the previous session
    pub fn initialize_hard_only(hard_ids: impl IntoIterator<Item = CardId>) -> Self {
        Self::shuffled(hard_ids, &mut rand::thread_rng())
    }

    /// Uniformly shuffled queue; repeated ids keep only their first occurrence
    pub fn shuffled<R: Rng + ?Sized>(ids: impl IntoIterator<Item = CardId>, rng: &mut R) -> Self {
        let mut seen = HashSet::new();
        let mut ids: Vec<CardId> = ids.into_iter().filter(|id| seen.insert(*id)).collect();
        ids.shuffle(rng);
        Self {
            pending: ids.into(),
        }
    }

    pub fn peek_next(&self) -> Option<CardId> {
        self.pending.front().copied()
    }

    /// Drop the head. Does nothing on an empty queue.
    pub fn advance(&mut self) {
        self.pending.pop_front();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = CardId> + '_ {
        self.pending.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_full_queue_is_permutation() {
        let queue = SessionQueue::initialize_full(1..=84);
        assert_eq!(queue.len(), 84);

        let mut ids: Vec<CardId> = queue.pending().collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=84).collect::<Vec<_>>());
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let queue = SessionQueue::initialize_hard_only(vec![4, 2, 4, 9, 2]);
        let mut ids: Vec<CardId> = queue.pending().collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![2, 4, 9]);
    }

    #[test]
    fn test_empty_input_gives_empty_queue() {
        let queue = SessionQueue::initialize_full(Vec::new());
        assert!(queue.is_empty());
        assert_eq!(queue.peek_next(), None);
    }

    #[test]
    fn test_peek_and_advance() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut queue = SessionQueue::shuffled(vec![10, 20, 30], &mut rng);
        let order: Vec<CardId> = queue.pending().collect();

        assert_eq!(queue.peek_next(), Some(order[0]));
        assert_eq!(queue.peek_next(), Some(order[0]));
        queue.advance();
        assert_eq!(queue.peek_next(), Some(order[1]));
        queue.advance();
        queue.advance();
        assert_eq!(queue.peek_next(), None);

        // Advancing past the end is harmless
        queue.advance();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = SessionQueue::shuffled(1..=20, &mut StdRng::seed_from_u64(42));
        let b = SessionQueue::shuffled(1..=20, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_reaches_every_head() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut heads = HashSet::new();
        for _ in 0..200 {
            let queue = SessionQueue::shuffled(vec![1, 2, 3], &mut rng);
            heads.insert(queue.peek_next().unwrap());
        }
        assert_eq!(heads.len(), 3);
    }
}
