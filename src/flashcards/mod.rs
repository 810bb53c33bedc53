//! Symbol flashcards and their rescheduling
//!
//! This module provides:
//! - The card and deck models
//! - The fixed-interval rescheduling rule
//! - CSV-backed deck and progress storage

pub mod algorithm;
pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{FlashcardStorage, FlashcardStorageError, FlashcardStore, StoredDeck};
