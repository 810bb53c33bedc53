use anyhow::Result;
use chrono::Utc;

use crate::app::App;
use crate::render::terminal as renderer;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.load_deck()?;
    let due = deck.due_cards(Utc::now());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing is due. {} flashcards scheduled ahead.", deck.len());
                return Ok(());
            }

            println!("{}", renderer::render_card_table(&due, use_color));
            println!("\n{} of {} flashcards due", due.len(), deck.len());
        }
    }

    Ok(())
}
