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

//! Aspect/zoom candidate resolution
//!
//! Pure functions turning (content size, zoom mode, aspect setting,
//! viewport) into the two candidate rectangles placement works with:
//!
//! - a **pixel candidate**: the content size stabilized and scaled by an
//!   exact integer factor, centered in the viewport;
//! - a **world candidate**: a continuous best-fit of the aspect setting
//!   within the projection plane (or the full plane when unconstrained).
//!
//! Which candidate wins per axis is decided later by the reconciler;
//! [`resolve`] always fills both so collision avoidance can move them in
//! lockstep.

use crate::core::config::{AspectRatio, ZoomMode};
use crate::core::geom::{PixelRect, Projection, WorldRect};
use crate::core::source::ContentSize;

use super::reconcile::AxisSources;

/// Candidate rectangles plus the per-axis authority decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidates {
    /// Integer-scaled rectangle in pixel space
    pub pixel: PixelRect,
    /// Continuous rectangle in world space
    pub world: WorldRect,
    /// Which representation is authoritative per axis
    pub sources: AxisSources,
}

/// Halve content axes that exceed the system's base resolution
///
/// Systems that mix a base resolution with a doubled high-resolution
/// mode would otherwise oscillate between two displayed sizes; halving
/// the oversized axis keeps the placement stable across both.
pub fn stabilized_size(
    size: ContentSize,
    base_width: Option<u32>,
    base_height: Option<u32>,
) -> ContentSize {
    let mut out = size;
    if let Some(base) = base_width {
        if base > 0 && out.width > base {
            out.width /= 2;
        }
    }
    if let Some(base) = base_height {
        if base > 0 && out.height > base {
            out.height /= 2;
        }
    }
    out
}

/// Correct extreme content ratios into [0.8, 2)
///
/// Axes are doubled, never cropped: an overly wide image gets its height
/// doubled until the ratio drops below 2, an overly tall image gets its
/// width doubled until the ratio reaches 0.8. Scale-factor selection
/// then works on a sanely proportioned size.
pub fn ratio_corrected_size(size: ContentSize) -> ContentSize {
    if size.is_zero() {
        return size;
    }
    let mut out = size;
    while out.width as f32 / out.height as f32 >= 2.0 {
        out.height = out.height.saturating_mul(2);
    }
    while (out.width as f32 / out.height as f32) < 0.8 {
        out.width = out.width.saturating_mul(2);
    }
    out
}

/// Integer-scale a corrected content size into the viewport
///
/// The scale axis is chosen by aspect comparison: content wider than the
/// viewport scales by width, otherwise by height. The factor is the
/// largest integer multiple fitting that axis, never less than 1 (small
/// viewports show oversized content rather than a fractional scale).
pub fn integer_scaled_rect(size: ContentSize, viewport: PixelRect) -> PixelRect {
    if size.is_zero() || viewport.is_empty() {
        return PixelRect::default();
    }
    let content_aspect = size.width as f32 / size.height as f32;
    let viewport_aspect = viewport.width() as f32 / viewport.height() as f32;
    let scale = if content_aspect > viewport_aspect {
        (viewport.width() / size.width as i32).max(1)
    } else {
        (viewport.height() / size.height as i32).max(1)
    };
    PixelRect::with_size(
        0,
        0,
        size.width as i32 * scale,
        size.height as i32 * scale,
    )
    .centered_in(&viewport)
}

/// Largest (width, height) of the given ratio fitting inside `w` x `h`
fn sizes_with_ratio_best_fit(ratio: f32, w: f32, h: f32) -> (f32, f32) {
    if ratio >= w / h {
        (w, w / ratio)
    } else {
        (h * ratio, h)
    }
}

/// Best-fit world rectangle for an aspect setting
///
/// Constrained ratios are fitted inside the projection plane and
/// centered; an unconstrained setting fills the whole plane.
pub fn world_best_fit(aspect: AspectRatio, proj: &Projection) -> WorldRect {
    match aspect.ratio() {
        Some(ratio) => {
            let (w, h) = sizes_with_ratio_best_fit(ratio, proj.width(), proj.height());
            WorldRect::centered(w, h)
        }
        None => proj.bounds(),
    }
}

/// World rectangle whose width follows an already-fixed pixel height
///
/// Used by integer-height zoom: the vertical extent is the unprojected
/// pixel height, the width is that height times the aspect ratio (or the
/// full plane width when unconstrained).
pub fn world_from_pixel_height(
    pixel_height: i32,
    aspect: AspectRatio,
    proj: &Projection,
) -> WorldRect {
    let h = proj.unproject_y_size(pixel_height);
    let w = match aspect.ratio() {
        Some(ratio) => h * ratio,
        None => proj.width(),
    };
    WorldRect::centered(w, h)
}

/// Compute both candidate rectangles for a zoom mode
///
/// Both representations are always filled: the non-authoritative one is
/// the projection of the authoritative one (or, for integer-height zoom,
/// the aspect-derived width around the pixel height). Zero content size
/// yields empty candidates.
pub fn resolve(
    size: ContentSize,
    base_width: Option<u32>,
    base_height: Option<u32>,
    zoom: ZoomMode,
    aspect: AspectRatio,
    viewport: PixelRect,
    proj: &Projection,
) -> Candidates {
    let sources = AxisSources::for_zoom(zoom);
    if size.is_zero() {
        return Candidates {
            pixel: PixelRect::default(),
            world: WorldRect::default(),
            sources,
        };
    }
    let corrected = ratio_corrected_size(stabilized_size(size, base_width, base_height));
    match zoom {
        ZoomMode::IntegerOnly => {
            let pixel = integer_scaled_rect(corrected, viewport);
            Candidates {
                pixel,
                world: proj.unproject_rect(pixel),
                sources,
            }
        }
        ZoomMode::IntegerOnlyY => {
            let pixel = integer_scaled_rect(corrected, viewport);
            let world = world_from_pixel_height(pixel.height(), aspect, proj);
            Candidates {
                pixel,
                world,
                sources,
            }
        }
        ZoomMode::Percent(value) => {
            let mut world = world_best_fit(aspect, proj);
            if value != 100 {
                world = world.scaled(value as f32 / 100.0);
            }
            Candidates {
                pixel: proj.project_rect(world),
                world,
                sources,
            }
        }
    }
}
