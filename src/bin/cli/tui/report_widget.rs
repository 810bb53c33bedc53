use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap};

use symdrill_lib::Rating;

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .title(" Session report ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(report) = state.report.as_ref() else {
        let empty = Paragraph::new("Session complete.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)])
        .split(inner);

    let bars: Vec<Bar> = Rating::ALL
        .into_iter()
        .map(|rating| {
            let color = match rating {
                Rating::Easy => Color::Green,
                Rating::Medium => Color::Yellow,
                Rating::Hard => Color::Red,
            };
            let pct = report.percentage(rating);
            Bar::default()
                .label(Line::from(rating.as_str()))
                .value(pct.round() as u64)
                .text_value(format!("{} ({:.0}%)", report.stats.count(rating), pct))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(4)
        .max(100);
    f.render_widget(chart, rows[0]);

    let mut lines = vec![Line::from(Span::styled(
        report.verdict.message(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(format!(
        "{} answered out of {}",
        report.stats.answered, report.stats.total_questions
    )));
    if report.hard_marked > 0 {
        lines.push(Line::from(Span::styled(
            format!(
                "You marked {} symbols as hard in this session.",
                report.hard_marked
            ),
            Style::default().fg(Color::Red),
        )));
    }

    let summary = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(summary, rows[1]);
}
