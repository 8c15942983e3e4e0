use std::{fs, io, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::content::ItemId;
use crate::error::StoreError;
use crate::stage::Progression;

/// Name of the single save slot.
pub const SAVE_SLOT: &str = "saveData";

/// Everything needed to put a session back exactly where it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSnapshot {
    pub player: Character,
    pub enemy: Character,
    pub current_stage: u32,
    pub inventory: Vec<ItemId>,
    pub leaves: u32,
    pub level_up_cost: u32,
}

impl SaveSnapshot {
    pub fn capture(player: &Character, enemy: &Character, progression: &Progression) -> Self {
        Self {
            player: player.clone(),
            enemy: enemy.clone(),
            current_stage: progression.current_stage,
            inventory: progression.inventory.clone(),
            leaves: progression.leaves,
            level_up_cost: progression.level_up_cost,
        }
    }

    pub fn progression(&self) -> Progression {
        Progression {
            current_stage: self.current_stage,
            leaves: self.leaves,
            level_up_cost: self.level_up_cost,
            inventory: self.inventory.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// One durable slot holding an opaque serialized snapshot.
pub trait SaveStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, StoreError>;
    /// Replaces whatever the slot held.
    fn write(&mut self, payload: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), StoreError> {
        self.slot = Some(payload.to_string());
        Ok(())
    }
}

/// Keeps the slot as `saveData.json` inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(format!("{}.json", SAVE_SLOT)) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

impl SaveStore for JsonFileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write(&mut self, payload: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, payload).map_err(|e| self.io_error(e))
    }
}
