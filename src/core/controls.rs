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

//! On-screen touch controls contract
//!
//! Placement only needs three facts about the virtual controller: is it
//! visible, where are its two button groups anchored, and how tall is a
//! button. The [`TouchControls`] trait exposes exactly that; hosts
//! without touch controls pass `None` and the layout logic skips
//! collision avoidance entirely.

use crate::core::geom::PixelRect;
use bitflags::bitflags;

bitflags! {
    /// Screen edges a control group is pinned to
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Anchor: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl Anchor {
    /// Whether the group sits against the top edge
    pub fn on_top(&self) -> bool {
        self.contains(Anchor::TOP)
    }

    /// Whether the group sits against the bottom edge
    pub fn on_bottom(&self) -> bool {
        self.contains(Anchor::BOTTOM)
    }
}

/// Queries the layer asks of a virtual-controller view
pub trait TouchControls {
    /// Whether the touch controls are currently shown
    fn controls_on(&self) -> bool;

    /// Anchor of the directional-pad group for the given orientation
    fn dpad_anchor(&self, portrait: bool) -> Anchor;

    /// Anchor of the face-button group for the given orientation
    fn face_anchor(&self, portrait: bool) -> Anchor;

    /// Bounds of a single button, used as collision padding
    fn button_bounds(&self) -> PixelRect;
}

/// Fixed-anchor touch layout
///
/// A minimal [`TouchControls`] provider with configurable anchors and a
/// fixed button size, used by the demo shell and tests.
#[derive(Debug, Clone)]
pub struct TouchLayout {
    /// Whether the controls are shown
    pub enabled: bool,
    /// D-pad anchor in landscape
    pub dpad_landscape: Anchor,
    /// D-pad anchor in portrait
    pub dpad_portrait: Anchor,
    /// Face-button anchor in landscape
    pub face_landscape: Anchor,
    /// Face-button anchor in portrait
    pub face_portrait: Anchor,
    /// Edge length of one button in pixels
    pub button_size: i32,
}

impl Default for TouchLayout {
    fn default() -> Self {
        Self {
            enabled: false,
            dpad_landscape: Anchor::BOTTOM | Anchor::LEFT,
            dpad_portrait: Anchor::BOTTOM | Anchor::LEFT,
            face_landscape: Anchor::BOTTOM | Anchor::RIGHT,
            face_portrait: Anchor::BOTTOM | Anchor::RIGHT,
            button_size: 96,
        }
    }
}

impl TouchControls for TouchLayout {
    fn controls_on(&self) -> bool {
        self.enabled
    }

    fn dpad_anchor(&self, portrait: bool) -> Anchor {
        if portrait {
            self.dpad_portrait
        } else {
            self.dpad_landscape
        }
    }

    fn face_anchor(&self, portrait: bool) -> Anchor {
        if portrait {
            self.face_portrait
        } else {
            self.face_landscape
        }
    }

    fn button_bounds(&self) -> PixelRect {
        PixelRect::with_size(0, 0, self.button_size, self.button_size)
    }
}
