//! Storage operations for flashcards
//!
//! Two CSV tables live in the data directory:
//! ```text
//! {data_dir}/
//! ├── database.csv             # Base deck: question,answer[,tags]
//! └── flashcards_symbols.csv   # Progress: id,question,answer,date_added,next_appearance,tags
//! ```
//! The base deck is the source of truth for which cards exist. The progress
//! table only contributes `date_added` and `next_appearance` for ids that are
//! still present in the base deck.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{CardId, FlashcardDeck, FlashcardRecord};

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid timestamp for card {id}: '{value}'")]
    InvalidTimestamp { id: CardId, value: String },
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

pub const DEFAULT_TAG: &str = "simbolos";

const TAG_SEPARATOR: char = ';';

/// Durable home of the cards a session reviews
pub trait FlashcardStore {
    fn deck(&self) -> &FlashcardDeck;

    fn deck_mut(&mut self) -> &mut FlashcardDeck;

    /// Write the current deck to durable storage
    fn persist(&self) -> Result<()>;
}

/// A bare deck is an in-memory store; nothing is written anywhere
impl FlashcardStore for FlashcardDeck {
    fn deck(&self) -> &FlashcardDeck {
        self
    }

    fn deck_mut(&mut self) -> &mut FlashcardDeck {
        self
    }

    fn persist(&self) -> Result<()> {
        Ok(())
    }
}

/// Row of the base deck table
#[derive(Debug, Deserialize)]
struct DeckRow {
    question: String,
    answer: String,
    #[serde(default)]
    tags: Option<String>,
}

/// Row of the progress table
#[derive(Debug, Serialize, Deserialize)]
struct ProgressRow {
    id: CardId,
    question: String,
    answer: String,
    date_added: String,
    next_appearance: String,
    #[serde(default)]
    tags: String,
}

impl From<&FlashcardRecord> for ProgressRow {
    fn from(card: &FlashcardRecord) -> Self {
        Self {
            id: card.id,
            question: card.prompt.clone(),
            answer: card.answer.clone(),
            date_added: card.date_added.to_rfc3339(),
            next_appearance: card.next_appearance.to_rfc3339(),
            tags: join_tags(card.tags.iter().map(String::as_str)),
        }
    }
}

fn join_tags<'a>(tags: impl Iterator<Item = &'a str>) -> String {
    tags.collect::<Vec<_>>().join(&TAG_SEPARATOR.to_string())
}

fn split_tags(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Parse a stored timestamp.
///
/// RFC 3339 is what we write. Naive `YYYY-MM-DD HH:MM:SS[.fff]` values (as
/// produced by spreadsheet tools) are read as local time.
pub fn parse_timestamp(id: CardId, value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    let invalid = || FlashcardStorageError::InvalidTimestamp {
        id,
        value: value.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(invalid)?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(invalid)
}

/// Storage manager for the deck and progress tables
#[derive(Debug, Clone)]
pub struct FlashcardStorage {
    deck_path: PathBuf,
    progress_path: PathBuf,
    default_tag: String,
}

impl FlashcardStorage {
    pub fn new(deck_path: PathBuf, progress_path: PathBuf) -> Self {
        Self {
            deck_path,
            progress_path,
            default_tag: DEFAULT_TAG.to_string(),
        }
    }

    /// Tag given to base deck rows that carry none
    pub fn with_default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into();
        self
    }

    pub fn deck_path(&self) -> &Path {
        &self.deck_path
    }

    pub fn progress_path(&self) -> &Path {
        &self.progress_path
    }

    /// Load the base deck and overlay saved progress.
    ///
    /// A missing base deck yields an empty deck. Cards without saved progress
    /// are added at `now` and due immediately.
    pub fn load(&self, now: DateTime<Utc>) -> Result<FlashcardDeck> {
        let mut deck = self.load_base_deck(now)?;
        if deck.is_empty() {
            return Ok(deck);
        }

        let mut restored = 0;
        for row in self.read_progress()? {
            let Some(card) = deck.get_mut(row.id) else {
                log::debug!("Ignoring progress for unknown card {}", row.id);
                continue;
            };
            card.date_added = parse_timestamp(row.id, &row.date_added)?;
            card.next_appearance = parse_timestamp(row.id, &row.next_appearance)?;
            restored += 1;
        }

        log::info!(
            "Loaded {} flashcards from {} ({} with saved progress)",
            deck.len(),
            self.deck_path.display(),
            restored
        );
        Ok(deck)
    }

    fn load_base_deck(&self, now: DateTime<Utc>) -> Result<FlashcardDeck> {
        if !self.deck_path.exists() {
            log::warn!("Deck file {} not found", self.deck_path.display());
            return Ok(FlashcardDeck::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Fields)
            .from_path(&self.deck_path)?;

        let mut deck = FlashcardDeck::new();
        for (index, result) in reader.deserialize::<DeckRow>().enumerate() {
            let row = result?;
            let id = (index + 1) as CardId;
            let mut card = FlashcardRecord::new(id, row.question, row.answer, now);
            card.tags = match row.tags.as_deref() {
                Some(raw) if !raw.trim().is_empty() => split_tags(raw).collect(),
                _ => std::iter::once(self.default_tag.clone()).collect(),
            };
            deck.insert(card);
        }
        Ok(deck)
    }

    fn read_progress(&self) -> Result<Vec<ProgressRow>> {
        if !self.progress_path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.progress_path)?;

        reader
            .deserialize::<ProgressRow>()
            .map(|row| row.map_err(Into::into))
            .collect()
    }

    /// Write every card to the progress table. An empty deck is not written.
    pub fn save(&self, deck: &FlashcardDeck) -> Result<()> {
        if deck.is_empty() {
            return Ok(());
        }
        write_table(deck, &self.progress_path)
    }

    /// Write the full card table to an arbitrary path
    pub fn export(&self, deck: &FlashcardDeck, path: &Path) -> Result<usize> {
        write_table(deck, path)?;
        Ok(deck.len())
    }
}

fn write_table(deck: &FlashcardDeck, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for card in deck.cards() {
        writer.serialize(ProgressRow::from(card))?;
    }
    let table = writer.into_inner().map_err(|e| e.into_error())?;

    // Atomic write: a failed save leaves the previous table in place
    let tmp_path = tmp_sibling(path);
    if let Err(err) = fs::write(&tmp_path, table) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// A deck paired with the CSV storage it was loaded from
#[derive(Debug)]
pub struct StoredDeck {
    deck: FlashcardDeck,
    storage: FlashcardStorage,
}

impl StoredDeck {
    pub fn open(storage: FlashcardStorage, now: DateTime<Utc>) -> Result<Self> {
        let deck = storage.load(now)?;
        Ok(Self { deck, storage })
    }

    pub fn storage(&self) -> &FlashcardStorage {
        &self.storage
    }

    pub fn into_deck(self) -> FlashcardDeck {
        self.deck
    }
}

impl FlashcardStore for StoredDeck {
    fn deck(&self) -> &FlashcardDeck {
        &self.deck
    }

    fn deck_mut(&mut self) -> &mut FlashcardDeck {
        &mut self.deck
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Timelike};
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 10, 0, 0).unwrap()
    }

    fn create_test_storage(deck_csv: Option<&str>) -> (FlashcardStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let deck_path = temp_dir.path().join("database.csv");
        let progress_path = temp_dir.path().join("flashcards_symbols.csv");
        if let Some(content) = deck_csv {
            fs::write(&deck_path, content).unwrap();
        }
        (FlashcardStorage::new(deck_path, progress_path), temp_dir)
    }

    const DECK: &str = "question,answer\nimages/1.png,Fire extinguisher\nimages/2.png,Emergency exit\nimages/3.png,Toxic\n";

    #[test]
    fn test_missing_deck_loads_empty() {
        let (storage, _temp) = create_test_storage(None);
        let deck = storage.load(now()).unwrap();
        assert!(deck.is_empty());
    }

    #[test]
    fn test_load_defaults_without_progress() {
        let (storage, _temp) = create_test_storage(Some(DECK));
        let deck = storage.load(now()).unwrap();

        assert_eq!(deck.ids(), vec![1, 2, 3]);
        let card = deck.get(2).unwrap();
        assert_eq!(card.prompt, "images/2.png");
        assert_eq!(card.answer, "Emergency exit");
        assert_eq!(card.date_added, now());
        assert_eq!(card.next_appearance, now() - Duration::days(1));
        assert!(card.tags.contains(DEFAULT_TAG));
    }

    #[test]
    fn test_deck_tags_column() {
        let (storage, _temp) = create_test_storage(Some(
            "question,answer,tags\na.png,A,fire; exit\nb.png,B,\n",
        ));
        let storage = storage.with_default_tag("misc");
        let deck = storage.load(now()).unwrap();

        let tags: Vec<&str> = deck.get(1).unwrap().tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["exit", "fire"]);
        assert!(deck.get(2).unwrap().tags.contains("misc"));
    }

    #[test]
    fn test_save_and_reload_progress() {
        let (storage, _temp) = create_test_storage(Some(DECK));
        let mut deck = storage.load(now()).unwrap();
        let next = now() + Duration::days(6);
        deck.get_mut(3).unwrap().next_appearance = next;
        storage.save(&deck).unwrap();

        let later = now() + Duration::days(1);
        let reloaded = storage.load(later).unwrap();
        assert_eq!(reloaded.get(3).unwrap().next_appearance, next);
        assert_eq!(reloaded.get(3).unwrap().date_added, now());
        // Progress rows exist for every card, so nothing falls back to `later`
        assert_eq!(reloaded.get(1).unwrap().date_added, now());
    }

    #[test]
    fn test_progress_for_unknown_ids_is_ignored() {
        let (storage, _temp) = create_test_storage(Some(DECK));
        fs::write(
            storage.progress_path(),
            "id,question,answer,date_added,next_appearance,tags\n\
             9,x.png,Gone,2026-01-01T00:00:00Z,2026-01-05T00:00:00Z,simbolos\n\
             1,images/1.png,Fire extinguisher,2026-01-01T00:00:00Z,2026-01-09T00:00:00Z,simbolos\n",
        )
        .unwrap();

        let deck = storage.load(now()).unwrap();
        assert_eq!(deck.len(), 3);
        assert!(!deck.contains(9));
        assert_eq!(
            deck.get(1).unwrap().next_appearance,
            Utc.with_ymd_and_hms(2026, 1, 9, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_save_empty_deck_is_noop() {
        let (storage, _temp) = create_test_storage(None);
        storage.save(&FlashcardDeck::new()).unwrap();
        assert!(!storage.progress_path().exists());
    }

    #[test]
    fn test_invalid_timestamp_is_reported() {
        let (storage, _temp) = create_test_storage(Some(DECK));
        fs::write(
            storage.progress_path(),
            "id,question,answer,date_added,next_appearance,tags\n2,b.png,B,yesterday,2026-01-05T00:00:00Z,\n",
        )
        .unwrap();

        match storage.load(now()) {
            Err(FlashcardStorageError::InvalidTimestamp { id, value }) => {
                assert_eq!(id, 2);
                assert_eq!(value, "yesterday");
            }
            other => panic!("expected invalid timestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_naive_timestamp_as_local() {
        let parsed = parse_timestamp(1, "2026-02-03 14:05:06.123456").unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
        assert_eq!((local.hour(), local.minute(), local.second()), (14, 5, 6));

        assert!(parse_timestamp(1, "2026-02-03").is_ok());
        assert!(parse_timestamp(1, "").is_err());
    }

    #[test]
    fn test_export_writes_full_table() {
        let (storage, temp) = create_test_storage(Some(DECK));
        let deck = storage.load(now()).unwrap();
        let out = temp.path().join("out").join("flashcards.csv");

        let written = storage.export(&deck, &out).unwrap();
        assert_eq!(written, 3);

        let content = fs::read_to_string(&out).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("id,question,answer,date_added,next_appearance,tags")
        );
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn test_failed_save_keeps_previous_progress() {
        let (storage, _temp) = create_test_storage(Some(DECK));
        let mut deck = storage.load(now()).unwrap();
        let saved = now() + Duration::days(4);
        deck.get_mut(2).unwrap().next_appearance = saved;
        storage.save(&deck).unwrap();
        let before = fs::read_to_string(storage.progress_path()).unwrap();

        // A directory squatting on the temp path makes the next write fail
        fs::create_dir(tmp_sibling(storage.progress_path())).unwrap();
        deck.get_mut(2).unwrap().next_appearance = now() + Duration::days(9);
        assert!(matches!(storage.save(&deck), Err(FlashcardStorageError::Io(_))));

        assert_eq!(fs::read_to_string(storage.progress_path()).unwrap(), before);
        let reloaded = storage.load(now()).unwrap();
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.get(2).unwrap().next_appearance, saved);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let (storage, _temp) = create_test_storage(Some(DECK));
        let deck = storage.load(now()).unwrap();
        storage.save(&deck).unwrap();
        storage.save(&deck).unwrap();

        assert!(storage.progress_path().exists());
        assert!(!tmp_sibling(storage.progress_path()).exists());
    }

    #[test]
    fn test_stored_deck_persists() {
        let (storage, _temp) = create_test_storage(Some(DECK));
        let mut stored = StoredDeck::open(storage.clone(), now()).unwrap();
        let next = now() + Duration::days(2);
        stored.deck_mut().get_mut(1).unwrap().next_appearance = next;
        stored.persist().unwrap();

        let reloaded = storage.load(now()).unwrap();
        assert_eq!(reloaded.get(1).unwrap().next_appearance, next);
    }
}
