//! Spaced-repetition drill for image-based symbol flashcards
//!
//! A review session shuffles the whole deck, reschedules each card from the
//! learner's Easy/Medium/Hard rating and, once finished, can be followed by a
//! drill over the cards rated hard.

pub mod config;
pub mod flashcards;
pub mod review;

pub use config::{Config, ConfigError};
pub use flashcards::{FlashcardDeck, FlashcardRecord, FlashcardStorage, Rating, StoredDeck};
pub use review::{SessionController, SessionMode, SessionState};
