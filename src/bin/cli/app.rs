use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

use symdrill_lib::flashcards::storage;
use symdrill_lib::flashcards::{FlashcardDeck, FlashcardStorage, FlashcardStore, StoredDeck};
use symdrill_lib::review::SessionController;
use symdrill_lib::Config;

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub storage: FlashcardStorage,
    pub dry_run: bool,
}

impl App {
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>, dry_run: bool) -> Result<Self> {
        let mut config = Config::load(config_path).context("Failed to load config")?;
        if let Some(dir) = data_dir {
            config.deck.data_dir = Some(dir);
        }

        let storage = config
            .storage()
            .context("Failed to resolve the deck location")?;

        Ok(Self {
            config,
            storage,
            dry_run,
        })
    }

    /// Load the deck with saved progress applied
    pub fn load_deck(&self) -> Result<FlashcardDeck> {
        self.storage
            .load(Utc::now())
            .with_context(|| format!("Failed to load deck from {}", self.storage.deck_path().display()))
    }

    /// Start a complete review session over the deck
    pub fn open_session(&self) -> Result<SessionController<AppStore>> {
        let store = if self.dry_run {
            log::info!("Dry run: progress will not be saved");
            AppStore::Memory(self.load_deck()?)
        } else {
            let stored = StoredDeck::open(self.storage.clone(), Utc::now()).with_context(|| {
                format!("Failed to load deck from {}", self.storage.deck_path().display())
            })?;
            AppStore::Stored(stored)
        };

        Ok(SessionController::new(store, self.config.session_options()))
    }
}

/// Deck backing a review: saved to disk, or kept in memory for dry runs
pub enum AppStore {
    Stored(StoredDeck),
    Memory(FlashcardDeck),
}

impl FlashcardStore for AppStore {
    fn deck(&self) -> &FlashcardDeck {
        match self {
            AppStore::Stored(stored) => stored.deck(),
            AppStore::Memory(deck) => deck,
        }
    }

    fn deck_mut(&mut self) -> &mut FlashcardDeck {
        match self {
            AppStore::Stored(stored) => stored.deck_mut(),
            AppStore::Memory(deck) => deck,
        }
    }

    fn persist(&self) -> storage::Result<()> {
        match self {
            AppStore::Stored(stored) => stored.persist(),
            AppStore::Memory(_) => Ok(()),
        }
    }
}
