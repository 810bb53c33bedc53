//! Review session state machine
//!
//! A session starts over the whole deck (`Complete`). Each rating reschedules
//! the head card, persists the deck, records the outcome and drops the card
//! from the queue. When the queue runs dry the session is `Completed`; from
//! there the learner can restart the full deck or, after a complete session,
//! drill only the cards they rated hard.

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::queue::SessionQueue;
use super::report::SessionReport;
use super::tracker::{HardSymbolSet, SessionStats, SessionTracker};
use crate::flashcards::algorithm::compute_next_appearance;
use crate::flashcards::{
    CardId, FlashcardRecord, FlashcardStorageError, FlashcardStore, InvalidRatingError, Rating,
};

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error(transparent)]
    InvalidRating(#[from] InvalidRatingError),

    #[error("Card not found: {0}")]
    RecordNotFound(CardId),

    #[error("Failed to save progress: {0}")]
    Persistence(#[from] FlashcardStorageError),

    #[error("No symbols were marked hard in this session")]
    EmptyTransition,

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    #[error("No card is waiting for an answer")]
    NoCurrentCard,

    #[error("Could not build the session report: {0}")]
    ReportFinalization(String),
}

pub type Result<T> = std::result::Result<T, ReviewError>;

/// Which population seeds a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionMode {
    /// Every card in the deck
    Complete,
    /// Cards rated hard during the preceding complete session
    HardOnly,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Complete => f.write_str("all symbols"),
            SessionMode::HardOnly => f.write_str("hard symbols only"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InSession(SessionMode),
    Completed(SessionMode),
}

impl SessionState {
    pub fn mode(&self) -> SessionMode {
        match self {
            SessionState::InSession(mode) | SessionState::Completed(mode) => *mode,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SessionState::Completed(_))
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::InSession(mode) => write!(f, "reviewing {}", mode),
            SessionState::Completed(mode) => write!(f, "finished reviewing {}", mode),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Forget the hard set once a hard-only drill starts, so that it only
    /// collects cards that are still hard during the drill
    pub clear_hard_on_hard_only: bool,
}

/// Result of rating one card
#[derive(Debug)]
pub struct AnswerOutcome {
    pub card_id: CardId,
    pub rating: Rating,
    pub next_appearance: DateTime<Utc>,
    /// The session ran out of cards with this answer
    pub completed: bool,
    /// Saving the deck failed (`ReviewError::Persistence`); the new date is
    /// kept in memory regardless
    pub persist_error: Option<ReviewError>,
}

impl AnswerOutcome {
    pub fn confirmation(&self) -> String {
        format!(
            "Card {} will appear again on {}",
            self.card_id,
            self.next_appearance.with_timezone(&Local).format("%d-%m-%Y")
        )
    }
}

/// What finalizing a completed session produced
#[derive(Debug)]
pub enum ReportOutcome {
    Ready(SessionReport),
    /// The report could not be built and a fresh complete session was started
    Restarted(ReviewError),
}

/// State owned by one review session
#[derive(Debug)]
pub struct SessionContext<S> {
    store: S,
    queue: SessionQueue,
    tracker: SessionTracker,
    state: SessionState,
}

pub struct SessionController<S: FlashcardStore> {
    ctx: SessionContext<S>,
    options: SessionOptions,
}

impl<S: FlashcardStore> SessionController<S> {
    /// Start a complete session over every card in `store`
    pub fn new(store: S, options: SessionOptions) -> Self {
        let mut controller = Self {
            ctx: SessionContext {
                store,
                queue: SessionQueue::default(),
                tracker: SessionTracker::default(),
                state: SessionState::InSession(SessionMode::Complete),
            },
            options,
        };
        controller.start_complete();
        controller
    }

    fn start_complete(&mut self) {
        let ctx = &mut self.ctx;
        ctx.tracker.clear_hard();
        ctx.queue = SessionQueue::initialize_full(ctx.store.deck().ids());
        ctx.tracker.reset(ctx.queue.len());
        ctx.state = SessionState::InSession(SessionMode::Complete);
        log::info!("Started complete session with {} cards", ctx.queue.len());
        self.settle_head();
    }

    /// Drop queue heads that no longer exist in the store and mark the session
    /// completed once nothing is left
    fn settle_head(&mut self) {
        let ctx = &mut self.ctx;
        while let Some(id) = ctx.queue.peek_next() {
            if ctx.store.deck().contains(id) {
                break;
            }
            log::warn!("{}, skipping", ReviewError::RecordNotFound(id));
            ctx.queue.advance();
        }

        if ctx.queue.is_empty() {
            if let SessionState::InSession(mode) = ctx.state {
                ctx.state = SessionState::Completed(mode);
                log::info!("Session complete ({})", mode);
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.ctx.state
    }

    pub fn mode(&self) -> SessionMode {
        self.ctx.state.mode()
    }

    /// Card awaiting a rating; `None` once the session is complete
    pub fn current_card(&self) -> Option<&FlashcardRecord> {
        match self.ctx.state {
            SessionState::InSession(_) => self
                .ctx
                .queue
                .peek_next()
                .and_then(|id| self.ctx.store.deck().get(id)),
            SessionState::Completed(_) => None,
        }
    }

    pub fn snapshot(&self) -> SessionStats {
        self.ctx.tracker.snapshot()
    }

    pub fn hard_this_session(&self) -> &HardSymbolSet {
        self.ctx.tracker.hard_this_session()
    }

    /// Cards left in the queue, including the current one
    pub fn remaining(&self) -> usize {
        self.ctx.queue.len()
    }

    pub fn store(&self) -> &S {
        &self.ctx.store
    }

    pub fn into_store(self) -> S {
        self.ctx.store
    }

    /// Rate the current card using the wall clock
    pub fn submit_rating(&mut self, rating: Rating) -> Result<AnswerOutcome> {
        self.submit_rating_at(rating, Utc::now())
    }

    /// Parse a raw rating before touching any state
    pub fn submit_rating_str(&mut self, raw: &str) -> Result<AnswerOutcome> {
        let rating: Rating = raw.parse()?;
        self.submit_rating(rating)
    }

    pub fn submit_rating_at(&mut self, rating: Rating, now: DateTime<Utc>) -> Result<AnswerOutcome> {
        let mode = match self.ctx.state {
            SessionState::InSession(mode) => mode,
            state => {
                return Err(ReviewError::InvalidTransition {
                    action: "answer",
                    state,
                })
            }
        };
        let id = self.ctx.queue.peek_next().ok_or(ReviewError::NoCurrentCard)?;

        let card = self
            .ctx
            .store
            .deck_mut()
            .get_mut(id)
            .ok_or(ReviewError::RecordNotFound(id))?;
        let next_appearance = compute_next_appearance(card, rating, now);
        card.next_appearance = next_appearance;
        log::debug!("Card {} rated {}, next appearance {}", id, rating, next_appearance);

        let persist_error = match self.ctx.store.persist() {
            Ok(()) => None,
            Err(err) => {
                log::warn!("Failed to save progress after rating card {}: {}", id, err);
                Some(ReviewError::from(err))
            }
        };

        self.ctx.tracker.record_answer(rating, id);
        self.ctx.queue.advance();
        self.settle_head();

        Ok(AnswerOutcome {
            card_id: id,
            rating,
            next_appearance,
            completed: self.ctx.state == SessionState::Completed(mode),
            persist_error,
        })
    }

    /// Throw away the current session and start over with the whole deck.
    /// Clears the hard set.
    pub fn request_restart_complete(&mut self) {
        self.start_complete();
    }

    /// Drill the cards rated hard in the complete session that just finished.
    ///
    /// The hard set is kept unless `clear_hard_on_hard_only` is set, so hard
    /// ratings during the drill add to the same set that seeded it.
    pub fn request_start_hard_only(&mut self) -> Result<()> {
        let state = self.ctx.state;
        if state != SessionState::Completed(SessionMode::Complete) {
            return Err(ReviewError::InvalidTransition {
                action: "start a hard-only session",
                state,
            });
        }

        let ctx = &mut self.ctx;
        if ctx.tracker.hard_this_session().is_empty() {
            log::info!("No hard symbols to review");
            return Err(ReviewError::EmptyTransition);
        }

        let hard: Vec<CardId> = ctx.tracker.hard_this_session().iter().collect();
        ctx.queue = SessionQueue::initialize_hard_only(hard);
        if self.options.clear_hard_on_hard_only {
            ctx.tracker.clear_hard();
        }
        ctx.tracker.reset(ctx.queue.len());
        ctx.state = SessionState::InSession(SessionMode::HardOnly);
        log::info!("Started hard-only session with {} cards", ctx.queue.len());
        self.settle_head();
        Ok(())
    }

    /// Build the report for a completed session.
    ///
    /// If the report cannot be built, a new complete session is started
    /// instead so the learner is never left on a broken screen.
    pub fn finalize_report(&mut self) -> Result<ReportOutcome> {
        let state = self.ctx.state;
        let SessionState::Completed(mode) = state else {
            return Err(ReviewError::InvalidTransition {
                action: "build a report",
                state,
            });
        };

        match SessionReport::finalize(mode, self.snapshot(), self.hard_this_session().len()) {
            Ok(report) => Ok(ReportOutcome::Ready(report)),
            Err(err) => {
                log::warn!("{}; restarting session", err);
                self.request_restart_complete();
                Ok(ReportOutcome::Restarted(err))
            }
        }
    }
}
