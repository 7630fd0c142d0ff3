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

//! Rectangle types for the two coordinate spaces used in video placement
//!
//! Screen-side geometry (viewports, integer-scaled content, touch-control
//! bounds) lives in pixel space: integer coordinates, origin at the top
//! left, y growing downward. GPU-side geometry lives in world space:
//! `f32` coordinates centered at the origin with y growing upward. The
//! [`Projection`](super::Projection) type maps between the two.

/// Axis-aligned rectangle in pixel space
///
/// Coordinates are integers with the origin at the top-left of the
/// surface; `(x, y)` is the top-left corner and `(x2, y2)` the exclusive
/// bottom-right corner, so `width == x2 - x` and `height == y2 - y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Right edge (exclusive)
    pub x2: i32,
    /// Bottom edge (exclusive)
    pub y2: i32,
}

impl PixelRect {
    /// Create a rectangle from its two corners
    pub fn new(x: i32, y: i32, x2: i32, y2: i32) -> Self {
        Self { x, y, x2, y2 }
    }

    /// Create a rectangle from a top-left corner and a size
    pub fn with_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> i32 {
        self.x2 - self.x
    }

    /// Height in pixels
    pub fn height(&self) -> i32 {
        self.y2 - self.y
    }

    /// Whether the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Horizontal center
    pub fn center_x(&self) -> i32 {
        self.x + self.width() / 2
    }

    /// Vertical center
    pub fn center_y(&self) -> i32 {
        self.y + self.height() / 2
    }

    /// This rectangle's size placed at the center of `outer`
    ///
    /// # Examples
    ///
    /// ```
    /// use retroframe::core::geom::PixelRect;
    ///
    /// let content = PixelRect::with_size(0, 0, 1024, 896);
    /// let viewport = PixelRect::with_size(0, 0, 1920, 1080);
    /// let placed = content.centered_in(&viewport);
    /// assert_eq!(placed, PixelRect::new(448, 92, 1472, 988));
    /// ```
    pub fn centered_in(&self, outer: &PixelRect) -> Self {
        let x = outer.x + (outer.width() - self.width()) / 2;
        let y = outer.y + (outer.height() - self.height()) / 2;
        Self::with_size(x, y, self.width(), self.height())
    }

    /// Translate so the top edge sits at `top`, preserving size
    pub fn align_top(&self, top: i32) -> Self {
        Self::with_size(self.x, top, self.width(), self.height())
    }

    /// Translate so the bottom edge sits at `bottom`, preserving size
    pub fn align_bottom(&self, bottom: i32) -> Self {
        Self::with_size(self.x, bottom - self.height(), self.width(), self.height())
    }
}

/// Axis-aligned rectangle in world space
///
/// Coordinates are `f32` in the GPU projection plane: origin at the
/// center, y growing upward. `(x, y)` is the bottom-left corner and
/// `(x2, y2)` the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldRect {
    /// Left edge
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    /// Right edge
    pub x2: f32,
    /// Top edge
    pub y2: f32,
}

impl WorldRect {
    /// Create a rectangle from its two corners
    pub fn new(x: f32, y: f32, x2: f32, y2: f32) -> Self {
        Self { x, y, x2, y2 }
    }

    /// Create a rectangle of the given size centered at the origin
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            x: -width / 2.0,
            y: -height / 2.0,
            x2: width / 2.0,
            y2: height / 2.0,
        }
    }

    /// Width in world units
    pub fn width(&self) -> f32 {
        self.x2 - self.x
    }

    /// Height in world units
    pub fn height(&self) -> f32 {
        self.y2 - self.y
    }

    /// Whether the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Horizontal center
    pub fn center_x(&self) -> f32 {
        (self.x + self.x2) / 2.0
    }

    /// Vertical center
    pub fn center_y(&self) -> f32 {
        (self.y + self.y2) / 2.0
    }

    /// Scale every coordinate by `factor`
    ///
    /// For an origin-centered rectangle this is a uniform scale about its
    /// center; for an offset rectangle the offset scales as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use retroframe::core::geom::WorldRect;
    ///
    /// let r = WorldRect::centered(2.0, 1.5).scaled(0.5);
    /// assert_eq!(r, WorldRect::centered(1.0, 0.75));
    /// ```
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            x2: self.x2 * factor,
            y2: self.y2 * factor,
        }
    }

    /// Translate so the top edge sits at `top`, preserving size
    pub fn align_top(&self, top: f32) -> Self {
        let dy = top - self.y2;
        Self {
            x: self.x,
            y: self.y + dy,
            x2: self.x2,
            y2: top,
        }
    }

    /// Translate so the bottom edge sits at `bottom`, preserving size
    pub fn align_bottom(&self, bottom: f32) -> Self {
        let dy = bottom - self.y;
        Self {
            x: self.x,
            y: bottom,
            x2: self.x2,
            y2: self.y2 + dy,
        }
    }
}
