use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use log::{debug, error, info, trace, warn};
use tempfile::NamedTempFile;

use crate::{DdayError, Event, Result};

/// Key of the single slot holding the whole event collection.
pub const EVENTS_KEY: &str = "dday_events";

/// Whole-collection persistence: every save overwrites the one slot.
pub trait Persistence {
    /// Writes the entire collection, replacing whatever the slot held.
    fn save(&self, events: &[Event]) -> Result<()>;

    /// Reads the collection back. An absent slot is an empty collection.
    fn load(&self) -> Result<Vec<Event>>;
}

/// Serializes the collection into the slot's JSON array blob.
pub fn encode_events(events: &[Event]) -> Result<String> {
    serde_json::to_string_pretty(events).map_err(|e| {
        error!("Failed to serialize events: {}", e);
        DdayError::Serialization(e)
    })
}

/// Parses a slot blob back into events.
pub fn decode_events(blob: &str) -> Result<Vec<Event>> {
    if blob.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(blob)?)
}

/// Saves and logs on failure. In-memory state stays authoritative until the
/// next successful save.
pub fn save_or_log<P: Persistence + ?Sized>(persistence: &P, events: &[Event]) {
    match persistence.save(events) {
        Ok(()) => trace!("Persisted {} events", events.len()),
        Err(e) => error!("Error saving events: {}", e),
    }
}

/// Loads the collection, treating any failure as "no data".
pub fn load_or_empty<P: Persistence + ?Sized>(persistence: &P) -> Vec<Event> {
    match persistence.load() {
        Ok(events) => {
            debug!("Loaded {} events", events.len());
            events
        }
        Err(e) => {
            warn!("Error loading events, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// Stores the slot as a JSON file inside a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    data_dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the slot file: `<data_dir>/dday_events.json`.
    pub fn slot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", EVENTS_KEY))
    }

    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            debug!(
                "Data directory does not exist, creating: {}",
                self.data_dir.display()
            );
            fs::create_dir_all(&self.data_dir).map_err(|e| {
                error!("Failed to create data directory: {}", e);
                DdayError::DirectoryError {
                    path: self.data_dir.clone(),
                }
            })?;
        }
        Ok(())
    }
}

impl Persistence for JsonFileStorage {
    /// Writes through a temporary file in the same directory and renames it
    /// over the slot, so a crash mid-write leaves the previous content.
    fn save(&self, events: &[Event]) -> Result<()> {
        self.ensure_data_dir()?;

        let file_path = self.slot_path();
        let json = encode_events(events)?;

        let dir = file_path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            DdayError::Io(e)
        })?;

        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;

        temp_file.persist(&file_path).map_err(|e| {
            error!(
                "Failed to persist file {}: {}",
                file_path.display(),
                e.error
            );
            DdayError::Io(e.error)
        })?;

        info!("Saved {} events to {}", events.len(), file_path.display());
        Ok(())
    }

    fn load(&self) -> Result<Vec<Event>> {
        let file_path = self.slot_path();
        if !file_path.exists() {
            debug!("No event slot at {}", file_path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&file_path).map_err(|e| {
            error!("Failed to open event slot {}: {}", file_path.display(), e);
            DdayError::Io(e)
        })?;

        decode_events(&content)
    }
}

/// In-memory slot, used where nothing should touch the disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with raw slot content, e.g. a blob written by an older build.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(blob.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// The raw slot content, if anything was ever written.
    pub fn blob(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Makes subsequent saves fail, simulating a full or read-only device.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Persistence for MemoryStorage {
    fn save(&self, events: &[Event]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DdayError::Io(std::io::Error::other(
                "memory slot is read-only",
            )));
        }

        let json = encode_events(events)?;
        let mut slot = self.slot.lock().map_err(|_| {
            DdayError::Io(std::io::Error::other("memory slot lock poisoned"))
        })?;
        *slot = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<Vec<Event>> {
        match self.blob() {
            Some(blob) => decode_events(&blob),
            None => Ok(Vec::new()),
        }
    }
}
