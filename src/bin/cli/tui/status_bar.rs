use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::{FlashKind, Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let bg = match msg.kind {
            FlashKind::Info => Color::Green,
            FlashKind::Warning => Color::Yellow,
            FlashKind::Error => Color::Red,
        };
        let flash = Paragraph::new(format!(" {}", msg.text))
            .style(Style::default().bg(bg).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let hints = match state.mode {
        Mode::Card => " Space: show answer  1/e: easy  2/m: medium  3/h: hard  r: restart  q: quit ",
        Mode::Report => {
            if state.report.as_ref().map_or(false, |r| r.offers_hard_only()) {
                " d: drill hard symbols  r: restart  q: quit "
            } else {
                " r: restart  q: quit "
            }
        }
    };

    let status = Paragraph::new(hints)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
