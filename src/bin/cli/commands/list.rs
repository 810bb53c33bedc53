use anyhow::Result;

use crate::app::App;
use crate::render::terminal as renderer;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.load_deck()?;
    let cards: Vec<_> = deck.cards().collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!(
                    "No flashcards found in {}.",
                    app.storage.deck_path().display()
                );
                return Ok(());
            }

            println!("{}", renderer::render_card_table(&cards, use_color));
            println!("\n{} flashcards total", cards.len());
        }
    }

    Ok(())
}
