use anyhow::{bail, Result};

use crate::app::App;
use crate::render::terminal::{self as renderer, Color};
use crate::OutputFormat;

pub fn run(app: &App, query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    if query.trim().is_empty() {
        bail!("Search query is empty");
    }

    let deck = app.load_deck()?;
    let matches = deck.search(query);

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = matches
                .iter()
                .map(|card| {
                    serde_json::json!({
                        "id": card.id,
                        "prompt": card.prompt,
                        "answer": card.answer,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if matches.is_empty() {
                println!("No results for '{}'.", query);
                return Ok(());
            }

            for card in &matches {
                println!(
                    "{} {}",
                    renderer::paint(&format!("Symbol {}", card.id), Color::BOLD, use_color),
                    renderer::paint(&card.prompt, Color::GRAY, use_color)
                );
                println!("  {}", card.answer.trim());
            }
            println!("\n{} results", matches.len());
        }
    }

    Ok(())
}
