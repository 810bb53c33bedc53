mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "symdrill", about = "Symbol flashcard drill (CLI and TUI)", version)]
struct Cli {
    /// Path to config.toml (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the deck and progress files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Review without saving progress
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Review every symbol in random order
    Review {
        /// Line-oriented review on stdin instead of the TUI
        #[arg(long)]
        plain: bool,
    },

    /// List all flashcards
    List,

    /// List flashcards whose next appearance has passed
    Due,

    /// Search answers (case-insensitive)
    Search {
        /// Text to look for
        query: String,
    },

    /// Write the full flashcard table to a CSV file
    Export {
        /// Destination file
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir, cli.dry_run)?;

    match cli.command {
        None | Some(Command::Review { plain: false }) => {
            #[cfg(feature = "tui")]
            {
                tui::run(&app)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                commands::review::run(&app, use_color)?;
            }
        }
        Some(Command::Review { plain: true }) => {
            commands::review::run(&app, use_color)?;
        }
        Some(Command::List) => {
            commands::list::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Due) => {
            commands::due::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Search { query }) => {
            commands::search::run(&app, &query, &cli.format, use_color)?;
        }
        Some(Command::Export { path }) => {
            commands::export::run(&app, &path, &cli.format)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
