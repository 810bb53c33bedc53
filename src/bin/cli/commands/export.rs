use std::path::Path;

use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, path: &Path, format: &OutputFormat) -> Result<()> {
    let deck = app.load_deck()?;
    let written = app
        .storage
        .export(&deck, path)
        .with_context(|| format!("Failed to export flashcards to {}", path.display()))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": path.to_string_lossy(),
                "cards": written,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Exported {} flashcards to {}", written, path.display());
        }
    }

    Ok(())
}
