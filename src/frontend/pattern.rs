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

//! Animated test pattern
//!
//! This module provides the demo content: a color-bar pattern with a
//! sweeping scanline, standing in for an emulated system. It implements
//! both source traits, so the video layer treats it exactly like real
//! content, including image rebinding and draw-batch fencing.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::render::{Fence, ImageId, RenderCommands, Renderer};
use crate::core::source::{ContentSize, ContentSource, VideoSource};

/// Color bars drawn left to right
const BARS: [[u8; 3]; 8] = [
    [255, 255, 255],
    [255, 255, 0],
    [0, 255, 255],
    [0, 255, 0],
    [255, 0, 255],
    [255, 0, 0],
    [0, 0, 255],
    [16, 16, 16],
];

/// Border color marking the content edge
const BORDER: [u8; 3] = [255, 128, 0];

/// Render one frame of the pattern as RGBA8 pixels
///
/// Eight vertical color bars inside a one-pixel border, with a white
/// scanline sweeping downward one row per frame. The sweep makes frame
/// pacing and tearing visible at a glance.
///
/// # Examples
///
/// ```
/// use retroframe::frontend::pattern::render_pixels;
///
/// let pixels = render_pixels(256, 224, 0);
/// assert_eq!(pixels.len(), 256 * 224 * 4);
/// ```
pub fn render_pixels(width: u32, height: u32, frame: u64) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    if width == 0 || height == 0 {
        return pixels;
    }
    let sweep = (frame % height as u64) as u32;
    for y in 0..height {
        for x in 0..width {
            let bar = (x * 8 / width) as usize;
            let mut rgb = BARS[bar.min(7)];
            if y == sweep {
                rgb = [255, 255, 255];
            }
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                rgb = BORDER;
            }
            pixels.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
    }
    pixels
}

/// Demo content source
///
/// Owns its pixel size and renderer image, and answers the layer's
/// lifecycle queries. Until [`connect`](Self::connect) attaches a
/// renderer the pattern has no image and draws are skipped, which keeps
/// construction free of GPU dependencies.
pub struct TestPattern {
    width: u32,
    height: u32,
    frame: u64,
    renderer: Option<Rc<RefCell<dyn Renderer>>>,
    image: Option<ImageId>,
    fence: Option<Fence>,
}

impl TestPattern {
    /// Create a pattern with the given content resolution
    ///
    /// # Examples
    ///
    /// ```
    /// use retroframe::frontend::pattern::TestPattern;
    ///
    /// let pattern = TestPattern::new(256, 224);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame: 0,
            renderer: None,
            image: None,
            fence: None,
        }
    }

    /// Attach a renderer and upload the first frame
    pub fn connect(&mut self, renderer: Rc<RefCell<dyn Renderer>>) {
        self.renderer = Some(renderer);
        self.reset_image();
    }

    /// Advance the animation by one frame
    ///
    /// Regenerates the pixels and updates the renderer image. When the
    /// previous draw batch has not completed yet the update is skipped
    /// and the frame counter still advances, so a slow GPU drops
    /// pattern updates instead of stalling the event loop.
    pub fn advance(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        let in_flight = self
            .fence
            .as_ref()
            .is_some_and(|fence| !fence.is_signaled());
        if in_flight {
            log::trace!("Skipping pattern update, frame {} still in flight", self.frame);
            return;
        }
        if let (Some(renderer), Some(image)) = (self.renderer.as_ref(), self.image) {
            let pixels = render_pixels(self.width, self.height, self.frame);
            renderer.borrow_mut().update_image(image, &pixels);
        }
    }
}

impl VideoSource for TestPattern {
    fn size(&self) -> ContentSize {
        ContentSize::new(self.width, self.height)
    }

    fn image(&self) -> Option<ImageId> {
        self.image
    }

    fn reset_image(&mut self) {
        let Some(renderer) = self.renderer.clone() else {
            return;
        };
        let mut renderer = renderer.borrow_mut();
        if let Some(image) = self.image.take() {
            renderer.drop_image(image);
        }
        let pixels = render_pixels(self.width, self.height, self.frame);
        self.image = Some(renderer.upload_image(&pixels, self.width, self.height));
        self.fence = None;
    }

    fn add_fence(&mut self, cmds: &mut dyn RenderCommands) {
        self.fence = Some(cmds.insert_fence());
    }
}

impl ContentSource for TestPattern {
    fn running(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * width + x) * 4) as usize;
        [
            pixels[offset],
            pixels[offset + 1],
            pixels[offset + 2],
            pixels[offset + 3],
        ]
    }

    #[test]
    fn test_pixel_buffer_dimensions() {
        let pixels = render_pixels(256, 224, 0);
        assert_eq!(pixels.len(), 256 * 224 * 4);
        assert!(render_pixels(0, 224, 0).is_empty());
    }

    #[test]
    fn test_border_frames_the_pattern() {
        let pixels = render_pixels(64, 48, 10);
        assert_eq!(pixel(&pixels, 64, 0, 0), [255, 128, 0, 255]);
        assert_eq!(pixel(&pixels, 64, 63, 47), [255, 128, 0, 255]);
        assert_eq!(pixel(&pixels, 64, 63, 0), [255, 128, 0, 255]);
    }

    #[test]
    fn test_sweep_line_moves_per_frame() {
        let width = 64;
        let first = render_pixels(width, 48, 5);
        let second = render_pixels(width, 48, 6);
        assert_eq!(pixel(&first, width, 8, 5), [255, 255, 255, 255]);
        assert_eq!(pixel(&second, width, 8, 6), [255, 255, 255, 255]);
        // The old sweep row went back to its bar color
        assert_ne!(pixel(&second, width, 8, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn test_bars_step_left_to_right() {
        let width = 80;
        let pixels = render_pixels(width, 48, 20);
        // Row away from sweep and border: first bar is white, last is near-black
        assert_eq!(pixel(&pixels, width, 2, 2), [255, 255, 255, 255]);
        assert_eq!(pixel(&pixels, width, 78, 2), [16, 16, 16, 255]);
    }

    #[test]
    fn test_pattern_reports_content_size() {
        let pattern = TestPattern::new(320, 240);
        assert_eq!(pattern.size(), ContentSize::new(320, 240));
        assert!(pattern.running());
        assert!(pattern.started());
        assert_eq!(pattern.image(), None);
    }
}
