use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use super::app_state::{Mode, TuiState};
use super::{card_widget, report_widget, status_bar};
use crate::render::terminal::mode_title;

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();

    // Header, progress gauge, body, status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(size);

    draw_header(f, outer[0], state);
    draw_progress(f, outer[1], state);

    match state.mode {
        Mode::Card => card_widget::draw(f, outer[2], state),
        Mode::Report => {
            state.card_area = None;
            state.button_areas = [None; 3];
            report_widget::draw(f, outer[2], state);
        }
    }

    status_bar::draw(f, outer[3], state);
}

fn draw_header(f: &mut Frame, area: Rect, state: &TuiState) {
    let title = Line::from(vec![
        Span::styled(" symdrill ", Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(
            mode_title(state.controller.mode()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_progress(f: &mut Frame, area: Rect, state: &TuiState) {
    let stats = state.controller.snapshot();
    let label = format!(
        "{}/{}  easy {}  medium {}  hard {}",
        stats.answered, stats.total_questions, stats.easy, stats.medium, stats.hard
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Progress ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(stats.progress())
        .label(label);
    f.render_widget(gauge, area);
}
