//! Data models for the flashcard deck

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, 1-based identifier of a flashcard within its deck
pub type CardId = u32;

/// Difficulty reported by the learner after seeing a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Easy,
    Medium,
    Hard,
}

impl Rating {
    pub const ALL: [Rating; 3] = [Rating::Easy, Rating::Medium, Rating::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Easy => "easy",
            Rating::Medium => "medium",
            Rating::Hard => "hard",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid rating '{0}': expected easy, medium or hard")]
pub struct InvalidRatingError(pub String);

impl FromStr for Rating {
    type Err = InvalidRatingError;

    /// Accepts the rating name, its initial, or the 1-3 key used by the UI
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" | "1" => Ok(Rating::Easy),
            "medium" | "m" | "2" => Ok(Rating::Medium),
            "hard" | "h" | "3" => Ok(Rating::Hard),
            _ => Err(InvalidRatingError(s.to_string())),
        }
    }
}

/// A single symbol flashcard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardRecord {
    pub id: CardId,
    /// Reference to the displayable prompt, usually an image path
    pub prompt: String,
    pub answer: String,
    pub date_added: DateTime<Utc>,
    /// Earliest moment the card is eligible to be scheduled again
    pub next_appearance: DateTime<Utc>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl FlashcardRecord {
    /// Card that is due immediately: added `now`, next appearance one day earlier
    pub fn new(id: CardId, prompt: String, answer: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            prompt,
            answer,
            date_added: now,
            next_appearance: now - chrono::Duration::days(1),
            tags: BTreeSet::new(),
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_appearance <= now
    }
}

/// All flashcards currently loaded, keyed by id
#[derive(Debug, Clone, Default)]
pub struct FlashcardDeck {
    cards: BTreeMap<CardId, FlashcardRecord>,
}

impl FlashcardDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a card, returning the previous record with the same id
    pub fn insert(&mut self, card: FlashcardRecord) -> Option<FlashcardRecord> {
        self.cards.insert(card.id, card)
    }

    pub fn get(&self, id: CardId) -> Option<&FlashcardRecord> {
        self.cards.get(&id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut FlashcardRecord> {
        self.cards.get_mut(&id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn ids(&self) -> Vec<CardId> {
        self.cards.keys().copied().collect()
    }

    /// Cards in id order
    pub fn cards(&self) -> impl Iterator<Item = &FlashcardRecord> {
        self.cards.values()
    }

    /// Cards whose next appearance has passed, oldest first
    pub fn due_cards(&self, now: DateTime<Utc>) -> Vec<&FlashcardRecord> {
        let mut due: Vec<&FlashcardRecord> = self.cards().filter(|c| c.is_due(now)).collect();
        due.sort_by(|a, b| a.next_appearance.cmp(&b.next_appearance).then(a.id.cmp(&b.id)));
        due
    }

    /// Case-insensitive substring search over answers
    pub fn search(&self, text: &str) -> Vec<&FlashcardRecord> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.cards()
            .filter(|c| c.answer.to_lowercase().contains(&needle))
            .collect()
    }
}

impl FromIterator<FlashcardRecord> for FlashcardDeck {
    fn from_iter<I: IntoIterator<Item = FlashcardRecord>>(iter: I) -> Self {
        let mut deck = FlashcardDeck::new();
        for card in iter {
            deck.insert(card);
        }
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
    }

    fn sample_deck() -> FlashcardDeck {
        let now = at(10);
        vec![
            FlashcardRecord::new(1, "images/1.png".into(), "Fire extinguisher".into(), now),
            FlashcardRecord::new(2, "images/2.png".into(), "Emergency exit".into(), now),
            FlashcardRecord::new(3, "images/3.png".into(), "Fire alarm".into(), now),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_rating_parse() {
        assert_eq!("easy".parse::<Rating>(), Ok(Rating::Easy));
        assert_eq!(" Medium ".parse::<Rating>(), Ok(Rating::Medium));
        assert_eq!("3".parse::<Rating>(), Ok(Rating::Hard));
        assert_eq!("h".parse::<Rating>(), Ok(Rating::Hard));
        assert!("again".parse::<Rating>().is_err());
        assert!("".parse::<Rating>().is_err());
    }

    #[test]
    fn test_new_card_is_due_immediately() {
        let now = at(10);
        let card = FlashcardRecord::new(1, "p".into(), "a".into(), now);
        assert_eq!(card.next_appearance, now - Duration::days(1));
        assert!(card.is_due(now));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let deck = sample_deck();
        let ids: Vec<CardId> = deck.search("FIRE").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(deck.search("   ").is_empty());
        assert!(deck.search("nothing").is_empty());
    }

    #[test]
    fn test_due_cards_sorted_by_next_appearance() {
        let mut deck = sample_deck();
        deck.get_mut(1).unwrap().next_appearance = at(9);
        deck.get_mut(2).unwrap().next_appearance = at(20);
        deck.get_mut(3).unwrap().next_appearance = at(5);

        let ids: Vec<CardId> = deck.due_cards(at(10)).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut deck = sample_deck();
        let replaced = deck.insert(FlashcardRecord::new(2, "x".into(), "y".into(), at(1)));
        assert!(replaced.is_some());
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.get(2).unwrap().answer, "y");
    }
}
