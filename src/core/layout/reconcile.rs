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

//! Candidate reconciliation
//!
//! The resolver produces a pixel-space and a world-space rectangle; this
//! module decides which one owns each axis, moves both in lockstep when
//! the touch overlay claims screen space, and finally projects the
//! non-authoritative axes so the two representations agree exactly.

use crate::core::controls::TouchControls;
use crate::core::geom::{PixelRect, Projection, WorldRect};

use super::resolver::Candidates;
use crate::core::config::ZoomMode;

/// Which representation owns an axis of the final rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSource {
    /// The integer pixel-space candidate owns this axis
    Pixel,
    /// The continuous world-space candidate owns this axis
    World,
}

/// Per-axis authority for the final rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSources {
    /// Authority for the x axis
    pub x: AxisSource,
    /// Authority for the y axis
    pub y: AxisSource,
}

impl AxisSources {
    /// The authority split a zoom mode dictates
    pub fn for_zoom(zoom: ZoomMode) -> Self {
        match zoom {
            ZoomMode::IntegerOnly => Self {
                x: AxisSource::Pixel,
                y: AxisSource::Pixel,
            },
            ZoomMode::IntegerOnlyY => Self {
                x: AxisSource::World,
                y: AxisSource::Pixel,
            },
            ZoomMode::Percent(_) => Self {
                x: AxisSource::World,
                y: AxisSource::World,
            },
        }
    }
}

/// Final display rectangle in both coordinate spaces
///
/// After [`finalize`] the two representations describe the same screen
/// region: the non-authoritative axis of each is the projection of the
/// authoritative one, never stale state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayRect {
    /// Pixel-space rectangle (integer scaling, collision math)
    pub pixel: PixelRect,
    /// World-space rectangle (GPU quad placement)
    pub world: WorldRect,
}

impl DisplayRect {
    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.pixel.is_empty() || self.world.is_empty()
    }
}

/// Move both candidates away from the touch overlay
///
/// Only applies in portrait (viewport aspect < 1) with the overlay shown
/// and applicable. When both control groups anchor to the top, content
/// moves to the bottom edge plus one button of padding; when the groups
/// are not in vertically opposite corners (typically both at the
/// bottom), content moves to the top edge. Vertically opposite groups
/// leave content centered between them.
pub fn avoid_touch_controls(
    candidates: &mut Candidates,
    viewport: PixelRect,
    proj: &Projection,
    touch: &dyn TouchControls,
    applicable: bool,
) {
    let portrait = viewport.width() < viewport.height();
    if !applicable || !touch.controls_on() || !portrait {
        return;
    }
    let padding = touch.button_bounds().height();
    let padding_w = proj.unproject_y_size(padding);
    let dpad = touch.dpad_anchor(portrait);
    let face = touch.face_anchor(portrait);

    if dpad.on_top() && face.on_top() {
        candidates.pixel = candidates.pixel.align_bottom(viewport.y2 - padding);
        candidates.world = candidates.world.align_bottom(proj.bounds().y + padding_w);
    } else {
        let opposite = (dpad.on_top() && face.on_bottom()) || (dpad.on_bottom() && face.on_top());
        if !opposite {
            candidates.pixel = candidates.pixel.align_top(viewport.y + padding);
            candidates.world = candidates.world.align_top(proj.bounds().y2 - padding_w);
        }
    }
}

/// Project the non-authoritative axes and produce the final rectangle
///
/// For each axis the authoritative representation stays untouched and
/// the other is recomputed through the projection, so pixel and world
/// rectangles always describe the same screen region. The y axis flips
/// between the spaces: the pixel bottom edge pairs with the world `y`.
pub fn finalize(candidates: Candidates, proj: &Projection) -> DisplayRect {
    let mut pixel = candidates.pixel;
    let mut world = candidates.world;

    match candidates.sources.x {
        AxisSource::Pixel => {
            world.x = proj.unproject_x(pixel.x);
            world.x2 = proj.unproject_x(pixel.x2);
        }
        AxisSource::World => {
            pixel.x = proj.project_x(world.x);
            pixel.x2 = proj.project_x(world.x2);
        }
    }
    match candidates.sources.y {
        AxisSource::Pixel => {
            world.y = proj.unproject_y(pixel.y2);
            world.y2 = proj.unproject_y(pixel.y);
        }
        AxisSource::World => {
            pixel.y = proj.project_y(world.y2);
            pixel.y2 = proj.project_y(world.y);
        }
    }

    DisplayRect { pixel, world }
}
