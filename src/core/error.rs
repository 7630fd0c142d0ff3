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

//! Error types for the retroframe front-end framework
//!
//! The video layer itself never returns errors (degraded inputs become
//! logged no-ops). Errors exist for the parts that touch the outside
//! world: settings/profile files, the save-slot store, and renderer
//! setup in the demo shell.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the front-end framework
#[derive(Error, Debug)]
pub enum FrontendError {
    /// File I/O failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path of the file being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML document could not be parsed
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML document could not be serialized
    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Save slot name is not usable
    #[error("Invalid slot name: {0:?}")]
    InvalidSlotName(String),

    /// Save slot already exists
    #[error("Slot already exists: {0:?}")]
    SlotExists(String),

    /// Save slot does not exist
    #[error("No such slot: {0:?}")]
    SlotMissing(String),

    /// Save slot is currently active and cannot be removed
    #[error("Slot is in use: {0:?}")]
    SlotActive(String),

    /// Renderer or window setup failed
    #[error("Renderer error: {0}")]
    Renderer(String),
}

impl FrontendError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for framework operations
pub type Result<T> = std::result::Result<T, FrontendError>;
