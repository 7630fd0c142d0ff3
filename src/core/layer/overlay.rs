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

//! Screen-space overlay masks
//!
//! Overlays are small procedural RGBA tiles (a scanline column, a CRT
//! cell) repeated across the content rectangle with a repeating sampler.
//! The repeat count tracks the content's line count so a scanline mask
//! always lands on emulated lines regardless of the displayed size.
//! Intensity is the alpha the mask is modulated with at draw time.

use crate::core::config::OverlayKind;
use crate::core::geom::WorldRect;
use crate::core::render::{
    BlendMode, ColorMode, ImageId, RenderCommands, Renderer, TexRect, TextureSampler,
};
use crate::core::source::ContentSize;

/// One dark/clear column cycle of a scanline mask (1x2 RGBA texels)
///
/// Row 0 is fully transparent, row 1 is opaque black; repeated once per
/// content line this darkens the lower half of every line.
pub(crate) fn scanline_pattern() -> (Vec<u8>, u32, u32) {
    let pixels = vec![
        0, 0, 0, 0, // clear half
        0, 0, 0, 255, // dark half
    ];
    (pixels, 1, 2)
}

/// One CRT cell (2x2 RGBA texels): dark grid lines on the right/bottom
pub(crate) fn crt_mask_pattern() -> (Vec<u8>, u32, u32) {
    let pixels = vec![
        0, 0, 0, 0, 0, 0, 0, 160, // clear | vertical grid line
        0, 0, 0, 160, 0, 0, 0, 208, // horizontal grid line | corner
    ];
    (pixels, 2, 2)
}

/// Overlay mask state owned by the video layer
#[derive(Debug)]
pub struct OverlayState {
    kind: OverlayKind,
    intensity: f32,
    image: Option<ImageId>,
    rect: WorldRect,
    uv: TexRect,
}

impl OverlayState {
    /// No overlay, default intensity
    pub fn new() -> Self {
        Self {
            kind: OverlayKind::Off,
            intensity: 0.25,
            image: None,
            rect: WorldRect::default(),
            uv: TexRect::unit(),
        }
    }

    /// The selected overlay kind
    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    /// Current blend intensity
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// The uploaded mask image, if any
    pub fn image(&self) -> Option<ImageId> {
        self.image
    }

    /// Switch the overlay kind, swapping the mask texture
    pub fn select(&mut self, renderer: &mut dyn Renderer, kind: OverlayKind) {
        if kind == self.kind && (self.image.is_some() || kind.is_off()) {
            return;
        }
        if let Some(image) = self.image.take() {
            renderer.drop_image(image);
        }
        self.kind = kind;
        if kind.is_off() {
            log::info!("Overlay disabled");
            return;
        }
        let (pixels, w, h) = match kind {
            OverlayKind::Scanlines | OverlayKind::Scanlines2x => scanline_pattern(),
            OverlayKind::CrtMask => crt_mask_pattern(),
            OverlayKind::Off => unreachable!(),
        };
        self.image = Some(renderer.upload_image(&pixels, w, h));
        log::info!("Overlay set to {}", kind);
    }

    /// Clamp and store the blend intensity
    pub fn set_intensity(&mut self, value: f32) {
        self.intensity = value.clamp(0.0, 1.0);
    }

    /// Track the content rectangle and line count
    ///
    /// The mask tile repeats once per content line for scanlines, once
    /// per two lines for the 2x variant, and once per content pixel for
    /// the CRT cell.
    pub fn place(&mut self, content: WorldRect, size: ContentSize) {
        self.rect = content;
        self.uv = match self.kind {
            OverlayKind::Scanlines => TexRect::repeated_v(size.height as f32),
            OverlayKind::Scanlines2x => TexRect::repeated_v(size.height as f32 / 2.0),
            OverlayKind::CrtMask => TexRect {
                u: 0.0,
                v: 0.0,
                u2: size.width as f32,
                v2: size.height as f32,
            },
            OverlayKind::Off => TexRect::unit(),
        };
    }

    /// Draw the mask over the content, alpha-blended
    pub fn draw(&self, cmds: &mut dyn RenderCommands) {
        let Some(image) = self.image else {
            return;
        };
        if self.intensity <= 0.0 || self.rect.is_empty() {
            return;
        }
        cmds.set_blend(BlendMode::Alpha);
        cmds.set_color(1.0, 1.0, 1.0, self.intensity);
        cmds.bind_quad_program(ColorMode::Modulate);
        cmds.set_sampler(TextureSampler::NoMipRepeat);
        cmds.draw_image(image, self.rect, self.uv);
    }
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new()
    }
}
