//! Loading of JSON seed files into the in-memory stores.

use eyre::{Result, WrapErr};
use std::path::Path;
use tutorgrid_core::errors::ValidationErrors;
use tutorgrid_core::models::ScheduleSlot;

use crate::models::SeedDocument;
use crate::repositories::directory::InMemoryDirectory;
use crate::repositories::slot::InMemorySlotStore;

/// Parsed seed contents.
#[derive(Debug, Default)]
pub struct Seed {
    pub slots: Vec<ScheduleSlot>,
    pub directory: InMemoryDirectory,
    /// Position in `weekly_schedule` and the reasons each rejected document was skipped.
    pub rejected: Vec<(usize, ValidationErrors)>,
}

impl Seed {
    pub fn into_stores(self) -> (InMemorySlotStore, InMemoryDirectory) {
        (InMemorySlotStore::with_slots(self.slots), self.directory)
    }
}

/// Parses a seed document. Malformed JSON fails the whole load; individual
/// schedule documents that do not validate are skipped and reported.
pub fn parse_seed(raw: &str) -> Result<Seed> {
    let document: SeedDocument = serde_json::from_str(raw).wrap_err("Failed to parse seed document")?;

    let mut slots = Vec::with_capacity(document.weekly_schedule.len());
    let mut rejected = Vec::new();

    for (index, db_slot) in document.weekly_schedule.into_iter().enumerate() {
        match db_slot.into_slot() {
            Ok(slot) => slots.push(slot),
            Err(errors) => {
                tracing::warn!("Skipping weekly_schedule[{}]: {}", index, errors);
                rejected.push((index, errors));
            }
        }
    }

    tracing::info!(
        "Seed parsed: {} slots, {} teachers, {} students, {} rejected",
        slots.len(),
        document.teachers.len(),
        document.students.len(),
        rejected.len()
    );

    Ok(Seed {
        slots,
        directory: InMemoryDirectory::new(document.teachers, document.students),
        rejected,
    })
}

pub fn load_seed(path: impl AsRef<Path>) -> Result<Seed> {
    let path = path.as_ref();
    tracing::debug!("Loading seed from {}", path.display());

    let raw = std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read seed file {}", path.display()))?;
    parse_seed(&raw)
}
