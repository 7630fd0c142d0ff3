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

//! World/pixel projection mapping
//!
//! A [`Projection`] ties a pixel-space viewport to the world-space plane
//! the GPU draws in. The plane is isotropic: it spans `[-a, a] x [-1, 1]`
//! where `a` is the viewport aspect ratio, so a square in world units is
//! a square on screen. Every placement pass keeps the pixel and world
//! representations of the content rectangle consistent by projecting the
//! non-authoritative axis through this mapping.

use super::rect::{PixelRect, WorldRect};

/// Mapping between a pixel-space viewport and the world-space plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    viewport: PixelRect,
    /// World plane width (twice the viewport aspect ratio)
    w: f32,
    /// World plane height (always 2 for a non-degenerate viewport)
    h: f32,
}

impl Projection {
    /// Create a projection for the given viewport
    ///
    /// A degenerate (empty) viewport produces a zero-sized plane; all
    /// mappings through it collapse to zero rather than dividing by zero.
    pub fn new(viewport: PixelRect) -> Self {
        if viewport.is_empty() {
            return Self {
                viewport,
                w: 0.0,
                h: 0.0,
            };
        }
        let aspect = viewport.width() as f32 / viewport.height() as f32;
        Self {
            viewport,
            w: 2.0 * aspect,
            h: 2.0,
        }
    }

    /// The pixel-space viewport this projection was built from
    pub fn viewport(&self) -> PixelRect {
        self.viewport
    }

    /// World plane width
    pub fn width(&self) -> f32 {
        self.w
    }

    /// World plane height
    pub fn height(&self) -> f32 {
        self.h
    }

    /// The full world plane as a rectangle centered at the origin
    pub fn bounds(&self) -> WorldRect {
        WorldRect::centered(self.w, self.h)
    }

    /// Map a pixel x coordinate to world space
    pub fn unproject_x(&self, px: i32) -> f32 {
        if self.viewport.is_empty() {
            return 0.0;
        }
        (px - self.viewport.x) as f32 / self.viewport.width() as f32 * self.w - self.w / 2.0
    }

    /// Map a pixel y coordinate to world space (flipping the y axis)
    pub fn unproject_y(&self, py: i32) -> f32 {
        if self.viewport.is_empty() {
            return 0.0;
        }
        self.h / 2.0 - (py - self.viewport.y) as f32 / self.viewport.height() as f32 * self.h
    }

    /// Map a world x coordinate back to pixel space
    pub fn project_x(&self, wx: f32) -> i32 {
        if self.viewport.is_empty() {
            return 0;
        }
        let frac = (wx + self.w / 2.0) / self.w;
        self.viewport.x + (frac * self.viewport.width() as f32).round() as i32
    }

    /// Map a world y coordinate back to pixel space (flipping the y axis)
    pub fn project_y(&self, wy: f32) -> i32 {
        if self.viewport.is_empty() {
            return 0;
        }
        let frac = (self.h / 2.0 - wy) / self.h;
        self.viewport.y + (frac * self.viewport.height() as f32).round() as i32
    }

    /// Convert a vertical pixel extent to world units
    pub fn unproject_y_size(&self, pixels: i32) -> f32 {
        if self.viewport.is_empty() {
            return 0.0;
        }
        pixels as f32 / self.viewport.height() as f32 * self.h
    }

    /// Convert a horizontal pixel extent to world units
    pub fn unproject_x_size(&self, pixels: i32) -> f32 {
        if self.viewport.is_empty() {
            return 0.0;
        }
        pixels as f32 / self.viewport.width() as f32 * self.w
    }

    /// Convert a pixel rectangle to its world-space equivalent
    ///
    /// The y axis flips: the pixel rect's bottom edge becomes the world
    /// rect's `y` and its top edge becomes `y2`.
    pub fn unproject_rect(&self, r: PixelRect) -> WorldRect {
        WorldRect {
            x: self.unproject_x(r.x),
            y: self.unproject_y(r.y2),
            x2: self.unproject_x(r.x2),
            y2: self.unproject_y(r.y),
        }
    }

    /// Convert a world rectangle to its pixel-space equivalent
    pub fn project_rect(&self, r: WorldRect) -> PixelRect {
        PixelRect {
            x: self.project_x(r.x),
            y: self.project_y(r.y2),
            x2: self.project_x(r.x2),
            y2: self.project_y(r.y),
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(PixelRect::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proj_1080p() -> Projection {
        Projection::new(PixelRect::with_size(0, 0, 1920, 1080))
    }

    #[test]
    fn test_plane_spans_aspect() {
        let p = proj_1080p();
        let aspect = 1920.0 / 1080.0;
        assert!((p.width() - 2.0 * aspect).abs() < 1e-5);
        assert_eq!(p.height(), 2.0);
        let b = p.bounds();
        assert!((b.x + aspect).abs() < 1e-5);
        assert_eq!(b.y, -1.0);
        assert_eq!(b.y2, 1.0);
    }

    #[test]
    fn test_corners_map_to_plane_corners() {
        let p = proj_1080p();
        assert!((p.unproject_x(0) - p.bounds().x).abs() < 1e-5);
        assert!((p.unproject_x(1920) - p.bounds().x2).abs() < 1e-5);
        // Pixel top is world top
        assert!((p.unproject_y(0) - 1.0).abs() < 1e-5);
        assert!((p.unproject_y(1080) + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_center_maps_to_origin() {
        let p = proj_1080p();
        assert!((p.unproject_x(960)).abs() < 1e-5);
        assert!((p.unproject_y(540)).abs() < 1e-5);
        assert_eq!(p.project_x(0.0), 960);
        assert_eq!(p.project_y(0.0), 540);
    }

    #[test]
    fn test_rect_round_trip() {
        let p = proj_1080p();
        let r = PixelRect::new(448, 92, 1472, 988);
        let round = p.project_rect(p.unproject_rect(r));
        assert_eq!(round, r);
    }

    #[test]
    fn test_rect_round_trip_offset_viewport() {
        let p = Projection::new(PixelRect::new(64, 32, 704, 512));
        let r = PixelRect::new(100, 60, 500, 400);
        assert_eq!(p.project_rect(p.unproject_rect(r)), r);
    }

    #[test]
    fn test_y_flip_in_rect_conversion() {
        let p = proj_1080p();
        // Upper half of the screen is the positive-y half of the plane
        let top_half = PixelRect::new(0, 0, 1920, 540);
        let w = p.unproject_rect(top_half);
        assert!((w.y).abs() < 1e-5);
        assert!((w.y2 - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_unproject_sizes() {
        let p = proj_1080p();
        assert!((p.unproject_y_size(1080) - 2.0).abs() < 1e-5);
        assert!((p.unproject_y_size(540) - 1.0).abs() < 1e-5);
        assert!((p.unproject_x_size(1920) - p.width()).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_viewport() {
        let p = Projection::new(PixelRect::default());
        assert_eq!(p.width(), 0.0);
        assert_eq!(p.unproject_x(100), 0.0);
        assert_eq!(p.project_y(1.0), 0);
        assert!(p.unproject_rect(PixelRect::with_size(0, 0, 10, 10)).is_empty());
    }
}
