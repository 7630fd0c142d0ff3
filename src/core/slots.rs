// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Save-slot persistence
//!
//! Automatic save state is organized into named slots. The unnamed main
//! slot always exists; extra slots can be created, renamed and deleted
//! while content runs. Selecting [`NO_SAVE_SLOT`] keeps content running
//! without touching saved state at all.
//!
//! [`DirSlotStore`] is the file-system implementation: each named slot
//! is a subdirectory of the store root, the main slot is the root
//! itself, and a slot exists exactly when its directory does.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::core::error::{FrontendError, Result};

/// Sentinel slot name that disables state saving entirely
///
/// The leading colon keeps it out of the namespace of real slots, which
/// reject `:` in validation.
pub const NO_SAVE_SLOT: &str = ":no-save";

/// Description used for slots that have no saved state yet
pub const NO_SAVED_STATE: &str = "No saved state";

/// Check that a name is usable for a real slot
///
/// The empty string (main slot) and [`NO_SAVE_SLOT`] are selectable but
/// never valid as created names.
fn validate_name(name: &str) -> Result<()> {
    let ok = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', ':'])
        && !name.starts_with('.');
    if ok {
        Ok(())
    } else {
        Err(FrontendError::InvalidSlotName(name.to_string()))
    }
}

/// Save-slot selection and management
///
/// `name` arguments identify slots: `""` is the main slot,
/// [`NO_SAVE_SLOT`] the disabled sentinel, anything else a named extra
/// slot. Management operations only apply to named slots.
pub trait SlotStore {
    /// The selected slot name
    fn current(&self) -> &str;

    /// Select a slot
    ///
    /// The main slot and [`NO_SAVE_SLOT`] are always selectable; a named
    /// slot must exist.
    ///
    /// # Errors
    ///
    /// Returns [`FrontendError::SlotMissing`] for an unknown named slot.
    fn set_current(&mut self, name: &str) -> Result<()>;

    /// Names of the extra slots, sorted
    fn slots(&self) -> Vec<String>;

    /// Create a new named slot
    ///
    /// # Errors
    ///
    /// Returns [`FrontendError::InvalidSlotName`] for unusable names,
    /// [`FrontendError::SlotExists`] when the name is taken, and
    /// [`FrontendError::Io`] when the backing storage fails.
    fn create(&mut self, name: &str) -> Result<()>;

    /// Rename a named slot, following the selection if it was current
    ///
    /// # Errors
    ///
    /// Returns [`FrontendError::SlotMissing`] when `old` does not exist,
    /// [`FrontendError::SlotExists`] when `new` is taken, and
    /// [`FrontendError::InvalidSlotName`] for an unusable new name.
    fn rename(&mut self, old: &str, new: &str) -> Result<()>;

    /// Delete a named slot and its saved state
    ///
    /// # Errors
    ///
    /// Returns [`FrontendError::SlotActive`] for the selected slot and
    /// [`FrontendError::SlotMissing`] for an unknown one.
    fn delete(&mut self, name: &str) -> Result<()>;

    /// Human-readable state description of a slot
    ///
    /// The local time of the newest write in the slot, or
    /// [`NO_SAVED_STATE`] when nothing has been saved.
    fn describe(&self, name: &str) -> String;
}

/// Slot store over a directory tree
///
/// Layout: saved state of the main slot lives directly in the root
/// directory; each subdirectory is one named slot. Existence is checked
/// against the file system on every query, so external changes show up
/// without invalidation logic.
#[derive(Debug)]
pub struct DirSlotStore {
    root: PathBuf,
    current: String,
}

impl DirSlotStore {
    /// Open a store at `root`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns [`FrontendError::Io`] when the root cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| FrontendError::io(&root, e))?;
        Ok(Self {
            root,
            current: String::new(),
        })
    }

    /// The store's root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_dir(&self, name: &str) -> PathBuf {
        if name.is_empty() {
            self.root.clone()
        } else {
            self.root.join(name)
        }
    }

    fn slot_exists(&self, name: &str) -> bool {
        self.slot_dir(name).is_dir()
    }

    /// Newest modification time of any file directly in `dir`
    ///
    /// Subdirectories are skipped; in the root they are other slots.
    fn newest_write_time(dir: &Path) -> Option<SystemTime> {
        let entries = fs::read_dir(dir).ok()?;
        entries
            .flatten()
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.metadata().ok()?.modified().ok())
            .max()
    }
}

impl SlotStore for DirSlotStore {
    fn current(&self) -> &str {
        &self.current
    }

    fn set_current(&mut self, name: &str) -> Result<()> {
        if !name.is_empty() && name != NO_SAVE_SLOT && !self.slot_exists(name) {
            return Err(FrontendError::SlotMissing(name.to_string()));
        }
        self.current = name.to_string();
        log::info!(
            "Save slot set to {}",
            match name {
                "" => "main",
                NO_SAVE_SLOT => "no-save",
                other => other,
            }
        );
        Ok(())
    }

    fn slots(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| validate_name(name).is_ok())
            .collect();
        names.sort();
        names
    }

    fn create(&mut self, name: &str) -> Result<()> {
        validate_name(name)?;
        if self.slot_exists(name) {
            return Err(FrontendError::SlotExists(name.to_string()));
        }
        let dir = self.slot_dir(name);
        fs::create_dir(&dir).map_err(|e| FrontendError::io(&dir, e))?;
        log::info!("Created save slot {:?}", name);
        Ok(())
    }

    fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        validate_name(old)?;
        validate_name(new)?;
        if !self.slot_exists(old) {
            return Err(FrontendError::SlotMissing(old.to_string()));
        }
        if self.slot_exists(new) {
            return Err(FrontendError::SlotExists(new.to_string()));
        }
        let from = self.slot_dir(old);
        let to = self.slot_dir(new);
        fs::rename(&from, &to).map_err(|e| FrontendError::io(&from, e))?;
        if self.current == old {
            self.current = new.to_string();
        }
        log::info!("Renamed save slot {:?} to {:?}", old, new);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        validate_name(name)?;
        if self.current == name {
            return Err(FrontendError::SlotActive(name.to_string()));
        }
        if !self.slot_exists(name) {
            return Err(FrontendError::SlotMissing(name.to_string()));
        }
        let dir = self.slot_dir(name);
        fs::remove_dir_all(&dir).map_err(|e| FrontendError::io(&dir, e))?;
        log::info!("Deleted save slot {:?}", name);
        Ok(())
    }

    fn describe(&self, name: &str) -> String {
        let Some(mtime) = Self::newest_write_time(&self.slot_dir(name)) else {
            return NO_SAVED_STATE.to_string();
        };
        let local: DateTime<Local> = mtime.into();
        local.format("%Y-%m-%d %H:%M").to_string()
    }
}
