use chrono::{DateTime, Local, Utc};

use symdrill_lib::flashcards::FlashcardRecord;
use symdrill_lib::review::{SessionMode, SessionReport, SessionStats};
use symdrill_lib::Rating;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn rating_color(rating: Rating) -> &'static str {
    match rating {
        Rating::Easy => Color::GREEN,
        Rating::Medium => Color::YELLOW,
        Rating::Hard => Color::RED,
    }
}

/// Calendar date in the learner's timezone
pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%d-%m-%Y").to_string()
}

pub fn mode_title(mode: SessionMode) -> &'static str {
    match mode {
        SessionMode::Complete => "Session: all symbols",
        SessionMode::HardOnly => "Session: hard symbols only",
    }
}

/// `[#####.....]` style bar for a fraction in `[0, 1]`
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

pub fn render_progress(stats: &SessionStats, use_color: bool) -> String {
    format!(
        "{} {}/{}  {} {}  {} {}  {} {}",
        progress_bar(stats.progress(), 20),
        stats.answered,
        stats.total_questions,
        paint("easy", Color::GREEN, use_color),
        stats.easy,
        paint("medium", Color::YELLOW, use_color),
        stats.medium,
        paint("hard", Color::RED, use_color),
        stats.hard,
    )
}

/// Aligned table of cards
pub fn render_card_table(cards: &[&FlashcardRecord], use_color: bool) -> String {
    let answer_width = cards
        .iter()
        .map(|c| c.answer.chars().count())
        .max()
        .unwrap_or(6)
        .clamp(6, 48);

    let mut lines = Vec::with_capacity(cards.len() + 2);
    lines.push(paint(
        &format!(
            "{:>4}  {:<width$}  {:<10}  {:<10}  Tags",
            "ID",
            "Answer",
            "Added",
            "Next",
            width = answer_width
        ),
        Color::BOLD,
        use_color,
    ));
    lines.push("\u{2500}".repeat(4 + 2 + answer_width + 2 + 10 + 2 + 10 + 6));

    for card in cards {
        let answer: String = card.answer.chars().take(answer_width).collect();
        let tags = card.tags.iter().cloned().collect::<Vec<_>>().join(", ");
        lines.push(format!(
            "{:>4}  {:<width$}  {:<10}  {:<10}  {}",
            card.id,
            answer,
            format_date(card.date_added),
            format_date(card.next_appearance),
            paint(&tags, Color::GRAY, use_color),
            width = answer_width
        ));
    }

    lines.join("\n")
}

pub fn render_report(report: &SessionReport, use_color: bool) -> String {
    let mut lines = vec![
        paint("Session report", Color::BOLD, use_color),
        format!("{} ({} answered)", mode_title(report.mode), report.stats.answered),
        String::new(),
    ];

    for rating in Rating::ALL {
        let count = report.stats.count(rating);
        let pct = report.percentage(rating);
        lines.push(format!(
            "  {:<7} {:>4} ({:>5.1}%) {}",
            paint(rating.as_str(), rating_color(rating), use_color),
            count,
            pct,
            progress_bar(pct / 100.0, 20)
        ));
    }

    lines.push(String::new());
    lines.push(report.verdict.message().to_string());

    if report.hard_marked > 0 {
        lines.push(format!(
            "You marked {} symbols as hard in this session.",
            report.hard_marked
        ));
    }

    lines.join("\n")
}
