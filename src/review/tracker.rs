//! Per-session outcome counters

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::flashcards::{CardId, Rating};

/// Counters for the active session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    /// Queue size when the session started
    pub total_questions: usize,
    pub answered: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl SessionStats {
    pub fn new(total_questions: usize) -> Self {
        Self {
            total_questions,
            ..Self::default()
        }
    }

    pub fn count(&self, rating: Rating) -> usize {
        match rating {
            Rating::Easy => self.easy,
            Rating::Medium => self.medium,
            Rating::Hard => self.hard,
        }
    }

    /// Share of the session already answered, within `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        (self.answered as f64 / self.total_questions as f64).clamp(0.0, 1.0)
    }

    /// True when `answered` matches the per-rating counters
    pub fn is_consistent(&self) -> bool {
        self.answered == self.easy + self.medium + self.hard
    }
}

/// Ids rated hard during the session, in the order they were first marked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CardId>", into = "Vec<CardId>")]
pub struct HardSymbolSet {
    ids: Vec<CardId>,
    seen: HashSet<CardId>,
}

impl HardSymbolSet {
    /// Returns false if the id was already marked
    pub fn insert(&mut self, id: CardId) -> bool {
        if !self.seen.insert(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.seen.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.seen.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.ids.iter().copied()
    }
}

impl From<Vec<CardId>> for HardSymbolSet {
    fn from(ids: Vec<CardId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<HardSymbolSet> for Vec<CardId> {
    fn from(set: HardSymbolSet) -> Self {
        set.ids
    }
}

impl FromIterator<CardId> for HardSymbolSet {
    fn from_iter<I: IntoIterator<Item = CardId>>(iter: I) -> Self {
        let mut set = Self::default();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    stats: SessionStats,
    hard_this_session: HardSymbolSet,
}

impl SessionTracker {
    pub fn new(total_questions: usize) -> Self {
        Self {
            stats: SessionStats::new(total_questions),
            hard_this_session: HardSymbolSet::default(),
        }
    }

    pub fn record_answer(&mut self, rating: Rating, id: CardId) {
        self.stats.answered += 1;
        match rating {
            Rating::Easy => self.stats.easy += 1,
            Rating::Medium => self.stats.medium += 1,
            Rating::Hard => {
                self.stats.hard += 1;
                self.hard_this_session.insert(id);
            }
        }
    }

    pub fn snapshot(&self) -> SessionStats {
        self.stats
    }

    /// Zero the counters for a new session. The hard set is left alone.
    pub fn reset(&mut self, total_questions: usize) {
        self.stats = SessionStats::new(total_questions);
    }

    pub fn hard_this_session(&self) -> &HardSymbolSet {
        &self.hard_this_session
    }

    pub fn clear_hard(&mut self) {
        self.hard_this_session.clear();
    }

    #[cfg(test)]
    pub(crate) fn from_parts(stats: SessionStats, hard_this_session: HardSymbolSet) -> Self {
        Self {
            stats,
            hard_this_session,
        }
    }
}
