use ratatui::prelude::Rect;

use symdrill_lib::review::{ReportOutcome, ReviewError, SessionController, SessionReport};
use symdrill_lib::Rating;

use crate::app::AppStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// A card is waiting for a rating
    Card,
    /// The session is over and its report is shown
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub text: String,
    pub kind: FlashKind,
}

pub struct TuiState {
    pub controller: SessionController<AppStore>,
    pub mode: Mode,

    // Card state
    pub show_answer: bool,

    // Report for the finished session
    pub report: Option<SessionReport>,

    // Rating button areas for mouse hit-testing (updated each draw)
    pub button_areas: [Option<Rect>; 3],
    pub card_area: Option<Rect>,

    pub flash_message: Option<FlashMessage>,
    pub quit: bool,
}

impl TuiState {
    pub fn new(controller: SessionController<AppStore>) -> Self {
        let mut state = Self {
            controller,
            mode: Mode::Card,
            show_answer: false,
            report: None,
            button_areas: [None; 3],
            card_area: None,
            flash_message: None,
            quit: false,
        };
        state.sync_mode();
        state
    }

    fn flash(&mut self, kind: FlashKind, text: impl Into<String>) {
        self.flash_message = Some(FlashMessage {
            text: text.into(),
            kind,
        });
    }

    /// Follow the controller into the report screen once the queue is empty
    fn sync_mode(&mut self) {
        self.show_answer = false;
        if !self.controller.state().is_completed() {
            self.mode = Mode::Card;
            self.report = None;
            return;
        }

        match self.controller.finalize_report() {
            Ok(ReportOutcome::Ready(report)) => {
                self.report = Some(report);
                self.mode = Mode::Report;
            }
            Ok(ReportOutcome::Restarted(err)) => {
                self.flash(FlashKind::Error, format!("{}. Restarting session...", err));
                self.report = None;
                self.mode = if self.controller.state().is_completed() {
                    Mode::Report
                } else {
                    Mode::Card
                };
            }
            Err(err) => {
                self.flash(FlashKind::Error, err.to_string());
            }
        }
    }

    pub fn toggle_answer(&mut self) {
        if self.mode == Mode::Card {
            self.show_answer = !self.show_answer;
        }
    }

    pub fn rate(&mut self, rating: Rating) {
        if self.mode != Mode::Card {
            return;
        }

        match self.controller.submit_rating(rating) {
            Ok(outcome) => {
                match &outcome.persist_error {
                    Some(err) => self.flash(
                        FlashKind::Warning,
                        format!("{} ({})", outcome.confirmation(), err),
                    ),
                    None => self.flash(FlashKind::Info, outcome.confirmation()),
                }
                self.sync_mode();
            }
            Err(err) => self.flash(FlashKind::Error, err.to_string()),
        }
    }

    pub fn start_hard_only(&mut self) {
        if self.mode != Mode::Report {
            return;
        }

        match self.controller.request_start_hard_only() {
            Ok(()) => self.sync_mode(),
            Err(ReviewError::EmptyTransition) => {
                self.flash(FlashKind::Info, "No symbols were marked hard in this session!");
            }
            Err(err) => self.flash(FlashKind::Warning, err.to_string()),
        }
    }

    pub fn restart(&mut self) {
        self.controller.request_restart_complete();
        self.sync_mode();
    }
}
