//! Review sessions over a flashcard deck
//!
//! This module provides:
//! - The shuffled session queue
//! - Outcome counters and the set of cards rated hard
//! - The session state machine and its end-of-session report

pub mod controller;
pub mod queue;
pub mod report;
pub mod tracker;

pub use controller::{
    AnswerOutcome, ReportOutcome, ReviewError, SessionController, SessionMode, SessionOptions,
    SessionState,
};
pub use queue::SessionQueue;
pub use report::{SessionReport, Verdict};
pub use tracker::{HardSymbolSet, SessionStats, SessionTracker};
