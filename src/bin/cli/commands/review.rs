use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use symdrill_lib::flashcards::algorithm::{format_interval, preview_intervals};
use symdrill_lib::review::{ReportOutcome, ReviewError, SessionController};

use crate::app::{App, AppStore};
use crate::render::terminal::{self as renderer, Color};

/// Line-oriented review loop on stdin
pub fn run(app: &App, use_color: bool) -> Result<()> {
    let mut controller = app.open_session()?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let prompt = if let Some(card) = controller.current_card() {
            println!();
            println!("{}", renderer::mode_title(controller.mode()));
            println!("{}", renderer::render_progress(&controller.snapshot(), use_color));
            println!(
                "{} {}",
                renderer::paint(&format!("Symbol nº {}", card.id), Color::BOLD, use_color),
                renderer::paint(&card.prompt, Color::GRAY, use_color)
            );
            let [easy, medium, hard] = preview_intervals(card).map(format_interval);
            format!(
                "[a]nswer  [e]asy {}  [m]edium {}  [h]ard {}  [r]estart  [q]uit > ",
                easy, medium, hard
            )
        } else {
            match controller.finalize_report()? {
                ReportOutcome::Ready(report) => {
                    println!();
                    println!("{}", renderer::render_report(&report, use_color));
                    if report.offers_hard_only() {
                        "[d]rill hard symbols  [r]estart  [q]uit > ".to_string()
                    } else {
                        "[r]estart  [q]uit > ".to_string()
                    }
                }
                ReportOutcome::Restarted(err) => {
                    eprintln!("Failed to build the session report ({}). Restarting session...", err);
                    continue;
                }
            }
        };

        print!("{}", prompt);
        io::stdout().flush().context("Failed to write to stdout")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let input = line.context("Failed to read from stdin")?;
        let input = input.trim();

        match input {
            "q" | "quit" => break,
            "" => continue,
            _ => {}
        }

        if controller.current_card().is_some() {
            match CardInput::parse(input) {
                CardInput::ShowAnswer => {
                    if let Some(card) = controller.current_card() {
                        println!("  {}", renderer::paint(card.answer.trim(), Color::CYAN, use_color));
                    }
                }
                CardInput::Restart => {
                    controller.request_restart_complete();
                    println!("Restarted with the whole deck.");
                }
                CardInput::Rate(raw) => answer(&mut controller, raw, use_color),
            }
        } else {
            match input {
                "r" => controller.request_restart_complete(),
                "d" => match controller.request_start_hard_only() {
                    Ok(()) => {}
                    Err(ReviewError::EmptyTransition) => {
                        println!("No symbols were marked hard in this session!");
                    }
                    Err(err) => println!("{}", err),
                },
                other => println!("Unknown command '{}'", other),
            }
        }
    }

    Ok(())
}

/// What a line typed while a card is showing asks for
#[derive(Debug, PartialEq)]
enum CardInput<'a> {
    ShowAnswer,
    Restart,
    Rate(&'a str),
}

impl<'a> CardInput<'a> {
    fn parse(input: &'a str) -> Self {
        match input {
            "a" => CardInput::ShowAnswer,
            "r" | "restart" => CardInput::Restart,
            other => CardInput::Rate(other),
        }
    }
}

fn answer(controller: &mut SessionController<AppStore>, input: &str, use_color: bool) {
    match controller.submit_rating_str(input) {
        Ok(outcome) => {
            let color = renderer::rating_color(outcome.rating);
            println!("{}", renderer::paint(&outcome.confirmation(), color, use_color));
            if let Some(err) = &outcome.persist_error {
                eprintln!(
                    "{}",
                    renderer::paint(&format!("Warning: {}", err), Color::YELLOW, use_color)
                );
            }
        }
        Err(err) => println!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_is_not_a_rating() {
        assert_eq!(CardInput::parse("r"), CardInput::Restart);
        assert_eq!(CardInput::parse("restart"), CardInput::Restart);
        assert_eq!(CardInput::parse("a"), CardInput::ShowAnswer);
        assert_eq!(CardInput::parse("h"), CardInput::Rate("h"));
        assert_eq!(CardInput::parse("2"), CardInput::Rate("2"));
    }
}
