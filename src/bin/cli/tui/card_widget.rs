use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use symdrill_lib::flashcards::algorithm::{format_interval, preview_intervals};
use symdrill_lib::Rating;

use super::app_state::TuiState;

fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Easy => Color::Green,
        Rating::Medium => Color::Yellow,
        Rating::Hard => Color::Red,
    }
}

pub fn draw(f: &mut Frame, area: Rect, state: &mut TuiState) {
    let Some(card) = state.controller.current_card() else {
        state.card_area = None;
        state.button_areas = [None; 3];
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let block = Block::default()
        .title(format!(" Symbol nº {} ", card.id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = vec![
        Line::from(Span::styled(
            card.prompt.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    if state.show_answer {
        for text_line in card.answer.lines() {
            lines.push(Line::from(Span::styled(
                text_line.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Press Space to reveal the answer",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, rows[0]);

    let intervals = preview_intervals(card);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    for (idx, rating) in Rating::ALL.into_iter().enumerate() {
        let color = rating_color(rating);
        let label = Line::from(vec![
            Span::styled(
                format!("{} {}", idx + 1, rating),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format_interval(intervals[idx]), Style::default().fg(Color::Gray)),
        ]);
        let button = Paragraph::new(label).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        f.render_widget(button, buttons[idx]);
        state.button_areas[idx] = Some(buttons[idx]);
    }

    state.card_area = Some(rows[0]);
}
