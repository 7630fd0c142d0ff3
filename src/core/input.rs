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

//! Input key-configuration model
//!
//! An emulated system describes its bindable actions as a list of
//! [`KeyCategory`] values over one flat key array; a [`KeyProfile`]
//! holds that array for one input device plus identifying metadata.
//! Key codes are opaque `u32` values owned by whichever input backend
//! produced the profile, so codes a build does not recognize survive a
//! load/save cycle unchanged.
//!
//! Category layout convention: the first category is player 1's
//! gameplay block; categories marked `multiplayer` are the blocks of
//! players 2 and up, in player order; UI and shortcut categories come
//! after.

use std::fs;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{FrontendError, Result};

/// Opaque key code as reported by the input backend
pub type Key = u32;

/// Key value meaning "not bound"
pub const KEY_UNBOUND: Key = 0;

/// Input device family a profile was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyMap {
    /// The host system's keyboard
    #[default]
    System,
    /// A generic game controller
    Gamepad,
    /// Keyboard-encoded arcade controllers
    ICade,
}

/// One group of bindable actions within a system's key array
#[derive(Debug, Clone, Copy)]
pub struct KeyCategory {
    /// Display name of the group
    pub name: &'static str,
    /// Display names of the actions, in array order
    pub key_names: &'static [&'static str],
    /// Index of the group's first key in the flat array
    pub offset: usize,
    /// Whether this group belongs to an additional player
    pub multiplayer: bool,
}

impl KeyCategory {
    /// A single-player category
    pub const fn new(name: &'static str, key_names: &'static [&'static str], offset: usize) -> Self {
        Self {
            name,
            key_names,
            offset,
            multiplayer: false,
        }
    }

    /// An additional player's copy of a gameplay category
    pub const fn multiplayer(
        name: &'static str,
        key_names: &'static [&'static str],
        offset: usize,
    ) -> Self {
        Self {
            name,
            key_names,
            offset,
            multiplayer: true,
        }
    }

    /// Number of actions in the category
    pub fn len(&self) -> usize {
        self.key_names.len()
    }

    /// Whether the category has no actions
    pub fn is_empty(&self) -> bool {
        self.key_names.is_empty()
    }
}

/// The category's index range, clamped to an array length
fn clamped_span(category: &KeyCategory, len: usize) -> Range<usize> {
    let start = category.offset.min(len);
    let end = (category.offset + category.len()).min(len);
    start..end
}

/// Named key bindings of one input device
///
/// Equality covers every field, so profile lists can deduplicate saved
/// against built-in profiles by comparison alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyProfile {
    /// Device family the codes belong to
    pub map: KeyMap,
    /// Hardware variant within the family, free-form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_subtype: Option<String>,
    /// Display name of the profile
    pub name: String,
    /// Flat key array indexed by category offsets
    #[serde(default)]
    pub keys: Vec<Key>,
}

impl KeyProfile {
    /// An empty profile for a device family
    pub fn new(map: KeyMap, name: impl Into<String>) -> Self {
        Self {
            map,
            device_subtype: None,
            name: name.into(),
            keys: Vec::new(),
        }
    }

    /// A profile with a prefilled key array
    pub fn with_keys(map: KeyMap, name: impl Into<String>, keys: Vec<Key>) -> Self {
        Self {
            map,
            device_subtype: None,
            name: name.into(),
            keys,
        }
    }

    /// The keys of one category
    ///
    /// Returns a shortened or empty slice when the profile's array does
    /// not cover the category, rather than panicking on a profile saved
    /// by a build with a different layout.
    pub fn keys_for(&self, category: &KeyCategory) -> &[Key] {
        &self.keys[clamped_span(category, self.keys.len())]
    }

    /// Clear every binding in one category
    pub fn unbind(&mut self, category: &KeyCategory) {
        let span = clamped_span(category, self.keys.len());
        self.keys[span].fill(KEY_UNBOUND);
    }

    /// Load a profile from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`FrontendError::Io`] when the file cannot be read and
    /// [`FrontendError::TomlParse`] for malformed content.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| FrontendError::io(path, e))?;
        Ok(toml::from_str(&text)?)
    }

    /// Save the profile as a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`FrontendError::TomlSerialize`] or [`FrontendError::Io`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| FrontendError::io(path, e))
    }
}

/// Retarget a two-player key array at one player
///
/// The second player's block is the first `multiplayer` category.
/// Player 0 clears that block, leaving player 1's keys in place; any
/// other player moves player 1's block there and clears the original.
pub fn transpose_2p(keys: &mut [Key], categories: &[KeyCategory], player: usize) {
    let Some(primary) = categories.first() else {
        return;
    };
    let Some(second) = categories.iter().find(|c| c.multiplayer) else {
        return;
    };
    let from = clamped_span(primary, keys.len());
    let to = clamped_span(second, keys.len());
    if player == 0 {
        keys[to].fill(KEY_UNBOUND);
        return;
    }
    let count = from.len().min(to.len());
    keys.copy_within(from.start..from.start + count, to.start);
    keys[from].fill(KEY_UNBOUND);
}

/// Retarget a multi-player key array at one player
///
/// Every `multiplayer` category is one player's block, in player order
/// starting at player 2. Player 0 clears all of them; player `p > 0`
/// moves player 1's block into block `p` and clears the others along
/// with the original.
pub fn transpose_multiplayer(keys: &mut [Key], categories: &[KeyCategory], player: usize) {
    let Some(primary) = categories.first() else {
        return;
    };
    let from = clamped_span(primary, keys.len());
    let blocks: Vec<Range<usize>> = categories
        .iter()
        .filter(|c| c.multiplayer)
        .map(|c| clamped_span(c, keys.len()))
        .collect();
    for (index, to) in blocks.iter().enumerate() {
        if player > 0 && index == player - 1 {
            let count = from.len().min(to.len());
            keys.copy_within(from.start..from.start + count, to.start);
        } else {
            keys[to.clone()].fill(KEY_UNBOUND);
        }
    }
    if player > 0 {
        keys[from].fill(KEY_UNBOUND);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAD: &[&str] = &["Up", "Down", "Left", "Right", "A", "B"];
    const SHORTCUTS: &[&str] = &["Menu", "Fast-forward"];

    fn two_player_categories() -> [KeyCategory; 3] {
        [
            KeyCategory::new("Gamepad", PAD, 0),
            KeyCategory::multiplayer("Gamepad 2", PAD, 6),
            KeyCategory::new("Shortcuts", SHORTCUTS, 12),
        ]
    }

    fn four_player_categories() -> [KeyCategory; 5] {
        [
            KeyCategory::new("Gamepad", PAD, 0),
            KeyCategory::multiplayer("Gamepad 2", PAD, 6),
            KeyCategory::multiplayer("Gamepad 3", PAD, 12),
            KeyCategory::multiplayer("Gamepad 4", PAD, 18),
            KeyCategory::new("Shortcuts", SHORTCUTS, 24),
        ]
    }

    fn filled_profile() -> KeyProfile {
        KeyProfile::with_keys(KeyMap::System, "Test", (1..=14).collect())
    }

    #[test]
    fn test_keys_for_returns_category_span() {
        let profile = filled_profile();
        let cats = two_player_categories();
        assert_eq!(profile.keys_for(&cats[0]), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(profile.keys_for(&cats[1]), &[7, 8, 9, 10, 11, 12]);
        assert_eq!(profile.keys_for(&cats[2]), &[13, 14]);
    }

    #[test]
    fn test_keys_for_clamps_short_arrays() {
        let profile = KeyProfile::with_keys(KeyMap::System, "Short", vec![1, 2, 3, 4]);
        let cats = two_player_categories();
        assert_eq!(profile.keys_for(&cats[0]), &[1, 2, 3, 4]);
        assert!(profile.keys_for(&cats[1]).is_empty());
        assert!(profile.keys_for(&cats[2]).is_empty());
    }

    #[test]
    fn test_unbind_zeroes_only_the_category() {
        let mut profile = filled_profile();
        let cats = two_player_categories();

        profile.unbind(&cats[1]);

        assert_eq!(profile.keys_for(&cats[0]), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(profile.keys_for(&cats[1]), &[0; 6]);
        assert_eq!(profile.keys_for(&cats[2]), &[13, 14]);
    }

    #[test]
    fn test_profile_equality_covers_all_fields() {
        let profile = filled_profile();
        assert_eq!(profile, profile.clone());

        let mut renamed = profile.clone();
        renamed.name = "Other".to_string();
        assert_ne!(profile, renamed);

        let mut rebound = profile.clone();
        rebound.keys[3] = 99;
        assert_ne!(profile, rebound);

        let mut retyped = profile.clone();
        retyped.map = KeyMap::Gamepad;
        assert_ne!(profile, retyped);
    }

    #[test]
    fn test_transpose_2p_moves_keys_to_player_two() {
        let mut keys: Vec<Key> = (1..=14).collect();
        let cats = two_player_categories();

        transpose_2p(&mut keys, &cats, 1);

        assert_eq!(&keys[..6], &[0; 6]);
        assert_eq!(&keys[6..12], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(&keys[12..], &[13, 14]);
    }

    #[test]
    fn test_transpose_2p_player_zero_clears_second_block() {
        let mut keys: Vec<Key> = (1..=14).collect();
        let cats = two_player_categories();

        transpose_2p(&mut keys, &cats, 0);

        assert_eq!(&keys[..6], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(&keys[6..12], &[0; 6]);
    }

    #[test]
    fn test_transpose_multiplayer_targets_one_block() {
        let mut keys: Vec<Key> = (1..=26).collect();
        let cats = four_player_categories();

        transpose_multiplayer(&mut keys, &cats, 2);

        // Player 3's block holds player 1's old keys, everything else
        // gameplay-related is cleared
        assert_eq!(&keys[..6], &[0; 6]);
        assert_eq!(&keys[6..12], &[0; 6]);
        assert_eq!(&keys[12..18], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(&keys[18..24], &[0; 6]);
        assert_eq!(&keys[24..], &[25, 26]);
    }

    #[test]
    fn test_transpose_multiplayer_player_zero_keeps_primary() {
        let mut keys: Vec<Key> = (1..=26).collect();
        let cats = four_player_categories();

        transpose_multiplayer(&mut keys, &cats, 0);

        assert_eq!(&keys[..6], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(&keys[6..24], &[0; 18]);
        assert_eq!(&keys[24..], &[25, 26]);
    }

    #[test]
    fn test_profile_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.toml");
        let mut profile = filled_profile();
        // Key codes from a backend this build has never seen
        profile.keys[0] = 0xFFFF_0001;
        profile.device_subtype = Some("left-handed".to_string());

        profile.save(&path).unwrap();
        let loaded = KeyProfile::load(&path).unwrap();

        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_profile_toml_omits_empty_subtype() {
        let profile = filled_profile();
        let text = toml::to_string_pretty(&profile).unwrap();
        assert!(!text.contains("device_subtype"));
        assert!(text.contains("map = \"system\""));
    }

    #[test]
    fn test_profile_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = KeyProfile::load(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(FrontendError::Io { .. })));

        let path = dir.path().join("bad.toml");
        fs::write(&path, "map = 7").unwrap();
        assert!(matches!(
            KeyProfile::load(&path),
            Err(FrontendError::TomlParse(_))
        ));
    }
}
