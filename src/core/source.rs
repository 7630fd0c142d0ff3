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

//! Content and video source contracts
//!
//! The video layer reads everything it knows about the emulated system
//! through two traits. [`ContentSource`] answers lifecycle questions
//! (is content running, fully started, what is its native resolution).
//! [`VideoSource`] owns the emulated framebuffer: its current pixel
//! size, the renderer image it lives in, and draw-batch fencing.
//!
//! Both traits provide defaults so minimal sources stay small; the demo
//! test pattern and the test fakes implement them directly.

use crate::core::render::{ImageId, RenderCommands};

/// Pixel dimensions of the emulated framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ContentSize {
    /// Create a content size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether there is no content to draw
    pub fn is_zero(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Lifecycle queries about the emulated system
pub trait ContentSource {
    /// Whether content is currently loaded and running
    fn running(&self) -> bool;

    /// Whether the content has fully started (first frame emulated)
    ///
    /// Defaults to [`running`](Self::running); systems with a separate
    /// warm-up phase override this.
    fn started(&self) -> bool {
        self.running()
    }

    /// Native horizontal resolution for multires stabilization
    ///
    /// Systems that switch between a base resolution and a doubled
    /// high-resolution mode report the base width here so placement can
    /// halve oversized frames before ratio math. `None` disables the
    /// stabilization on this axis.
    fn multires_base_width(&self) -> Option<u32> {
        None
    }

    /// Native vertical resolution for multires stabilization
    fn multires_base_height(&self) -> Option<u32> {
        None
    }

    /// Whether on-screen touch controls make sense for this content
    fn touch_controls_applicable(&self) -> bool {
        true
    }
}

/// The emulated framebuffer as the renderer sees it
pub trait VideoSource {
    /// Current content pixel size
    fn size(&self) -> ContentSize;

    /// Renderer image holding the current frame, if one exists
    fn image(&self) -> Option<ImageId>;

    /// Recreate the image source
    ///
    /// Called when display geometry or the effect chain changes so the
    /// source can drop stale GPU bindings.
    fn reset_image(&mut self);

    /// Request a completion fence covering the current draw batch
    ///
    /// Sources that pace frame reuse store the fence; the default
    /// honors the contract by inserting one and discarding it.
    fn add_fence(&mut self, cmds: &mut dyn RenderCommands) {
        let _ = cmds.insert_fence();
    }
}
