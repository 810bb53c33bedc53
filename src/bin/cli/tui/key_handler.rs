use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::Rect;

use symdrill_lib::Rating;

use super::app_state::{Mode, TuiState};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    match state.mode {
        Mode::Card => handle_card_key(state, key),
        Mode::Report => handle_report_key(state, key),
    }
}

fn handle_card_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
        KeyCode::Char(' ') | KeyCode::Char('a') | KeyCode::Enter => state.toggle_answer(),
        KeyCode::Char('1') | KeyCode::Char('e') => state.rate(Rating::Easy),
        KeyCode::Char('2') | KeyCode::Char('m') => state.rate(Rating::Medium),
        KeyCode::Char('3') | KeyCode::Char('h') => state.rate(Rating::Hard),
        KeyCode::Char('r') => state.restart(),
        _ => {}
    }
}

fn handle_report_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
        KeyCode::Char('d') => state.start_hard_only(),
        KeyCode::Char('r') | KeyCode::Enter => state.restart(),
        _ => {}
    }
}

fn contains(area: &Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height
}

pub fn handle_mouse(state: &mut TuiState, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) || state.mode != Mode::Card {
        return;
    }
    let (col, row) = (mouse.column, mouse.row);

    // Rating buttons take priority over the card panel they sit under
    let clicked = state
        .button_areas
        .iter()
        .position(|area| area.map_or(false, |a| contains(&a, col, row)));
    if let Some(idx) = clicked {
        state.flash_message = None;
        state.rate(Rating::ALL[idx]);
        return;
    }

    if let Some(area) = state.card_area {
        if contains(&area, col, row) {
            state.toggle_answer();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crossterm::event::KeyModifiers;
    use symdrill_lib::review::{SessionController, SessionMode, SessionOptions, SessionState};
    use symdrill_lib::{FlashcardDeck, FlashcardRecord};

    use crate::app::AppStore;

    fn state(n: u32) -> TuiState {
        let deck: FlashcardDeck = (1..=n)
            .map(|id| FlashcardRecord::new(id, format!("images/{}.png", id), format!("Symbol {}", id), Utc::now()))
            .collect();
        TuiState::new(SessionController::new(AppStore::Memory(deck), SessionOptions::default()))
    }

    fn press(state: &mut TuiState, c: char) {
        handle_key(state, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    #[test]
    fn test_restart_mid_session() {
        let mut state = state(3);
        press(&mut state, 'h');
        press(&mut state, 'e');
        assert_eq!(state.controller.snapshot().answered, 2);
        assert_eq!(state.controller.hard_this_session().len(), 1);

        press(&mut state, 'r');
        assert_eq!(state.mode, Mode::Card);
        assert_eq!(state.controller.state(), SessionState::InSession(SessionMode::Complete));
        assert_eq!(state.controller.snapshot().answered, 0);
        assert_eq!(state.controller.remaining(), 3);
        assert!(state.controller.hard_this_session().is_empty());
    }

    #[test]
    fn test_finishing_deck_shows_report() {
        let mut state = state(2);
        press(&mut state, 'h');
        press(&mut state, '3');
        assert_eq!(state.mode, Mode::Report);
        assert!(state.report.as_ref().map_or(false, |r| r.offers_hard_only()));

        press(&mut state, 'd');
        assert_eq!(state.mode, Mode::Card);
        assert_eq!(state.controller.mode(), SessionMode::HardOnly);
    }
}
