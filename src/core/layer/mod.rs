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

//! Video layer composition root
//!
//! [`VideoLayer`] owns everything needed to put emulated video on
//! screen: the display rectangle in both coordinate spaces, the overlay
//! mask, the shader-effect state, and the brightness/filter flags. The
//! host calls [`place`](VideoLayer::place) on layout or settings changes
//! and [`draw`](VideoLayer::draw) once per frame; every other operation
//! is a setter that adjusts persisted state.
//!
//! The layer is single-threaded and caller-serialized. Collaborators
//! are shared `Rc<RefCell<...>>` handles, the same wiring the host uses
//! to feed frames into the video source between draws.

pub mod effect;
pub mod overlay;

pub use effect::{EffectResources, EffectState};
pub use overlay::OverlayState;

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::config::{EffectKind, OverlayKind, VideoSettings};
use crate::core::controls::TouchControls;
use crate::core::geom::{PixelRect, Projection};
use crate::core::layout::{reconcile, resolver, DisplayRect};
use crate::core::render::{
    BlendMode, ColorMode, ImageId, RenderCommands, Renderer, TexRect, TextureSampler,
};
use crate::core::source::{ContentSource, VideoSource};

#[cfg(test)]
mod tests;

/// How the next frame's content reaches the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    /// Content texture drawn straight to the surface
    DirectDraw,
    /// Content rendered through the effect target, then presented
    EffectPass,
}

/// Compositor for one emulated system's video output
pub struct VideoLayer {
    video: Rc<RefCell<dyn VideoSource>>,
    content: Rc<RefCell<dyn ContentSource>>,
    renderer: Rc<RefCell<dyn Renderer>>,
    rect: DisplayRect,
    overlay: OverlayState,
    effect: EffectState,
    display_image: Option<ImageId>,
    linear_filter: bool,
    brightness: f32,
}

impl VideoLayer {
    /// Create a layer over the given collaborators
    ///
    /// Starts with no effect, no overlay, linear filtering and full
    /// brightness; call [`apply_settings`](Self::apply_settings) to
    /// bring it in line with persisted settings.
    pub fn new(
        video: Rc<RefCell<dyn VideoSource>>,
        content: Rc<RefCell<dyn ContentSource>>,
        renderer: Rc<RefCell<dyn Renderer>>,
    ) -> Self {
        Self {
            video,
            content,
            renderer,
            rect: DisplayRect::default(),
            overlay: OverlayState::new(),
            effect: EffectState::new(),
            display_image: None,
            linear_filter: true,
            brightness: 1.0,
        }
    }

    /// The display rectangle produced by the last placement
    pub fn content_rect(&self) -> DisplayRect {
        self.rect
    }

    /// The image the next draw will present
    pub fn display_image(&self) -> Option<ImageId> {
        self.display_image
    }

    /// The selected effect kind
    pub fn effect_kind(&self) -> EffectKind {
        self.effect.kind()
    }

    /// The selected overlay kind
    pub fn overlay_kind(&self) -> OverlayKind {
        self.overlay.kind()
    }

    /// Current overlay intensity
    pub fn overlay_intensity(&self) -> f32 {
        self.overlay.intensity()
    }

    /// Current brightness multiplier
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Whether content is sampled with linear filtering
    pub fn linear_filter(&self) -> bool {
        self.linear_filter
    }

    /// The draw path the next frame will take
    pub fn render_path(&self) -> RenderPath {
        if self.effect.is_active() {
            RenderPath::EffectPass
        } else {
            RenderPath::DirectDraw
        }
    }

    /// Recompute the display rectangle for a viewport
    ///
    /// Runs the full pipeline: candidate resolution, touch-overlay
    /// avoidance, per-axis reconciliation, then overlay repositioning
    /// and effect-target resynchronization. With no running content the
    /// previous geometry is kept; zero-width content yields an empty
    /// rectangle and a skipped draw.
    pub fn place(
        &mut self,
        viewport: PixelRect,
        proj: &Projection,
        settings: &VideoSettings,
        touch: Option<&dyn TouchControls>,
    ) {
        let size = self.video.borrow().size();
        let running = self.content.borrow().running();
        if running {
            if size.is_zero() {
                self.rect = DisplayRect::default();
            } else {
                let (base_w, base_h, applicable) = {
                    let content = self.content.borrow();
                    (
                        content.multires_base_width(),
                        content.multires_base_height(),
                        content.touch_controls_applicable(),
                    )
                };
                let mut candidates = resolver::resolve(
                    size,
                    base_w,
                    base_h,
                    settings.zoom,
                    settings.aspect,
                    viewport,
                    proj,
                );
                if let Some(touch) = touch {
                    reconcile::avoid_touch_controls(
                        &mut candidates,
                        viewport,
                        proj,
                        touch,
                        applicable,
                    );
                }
                self.rect = reconcile::finalize(candidates, proj);
                log::debug!(
                    "Placed {}x{} content at {:?} (zoom {}, aspect {})",
                    size.width,
                    size.height,
                    self.rect.pixel,
                    settings.zoom,
                    settings.aspect
                );
            }
        }
        self.overlay.place(self.rect.world, size);
        self.effect
            .sync_size(&mut *self.renderer.borrow_mut(), size);
    }

    /// Draw one frame of content, effect, and overlay
    ///
    /// A silent no-op while the content is not fully started, while the
    /// display rectangle is empty, or while no image is bound. The
    /// overlay draws last, unconditionally, over whichever path ran.
    pub fn draw(&mut self, cmds: &mut dyn RenderCommands) {
        if !self.content.borrow().started() {
            return;
        }
        if self.rect.is_empty() {
            return;
        }
        let Some(image) = self.display_image else {
            return;
        };
        let source = self.video.borrow().image();

        let mut mode = ColorMode::Replace;
        if (self.brightness - 1.0).abs() > f32::EPSILON {
            cmds.set_color(self.brightness, self.brightness, self.brightness, 1.0);
            mode = ColorMode::Modulate;
        }
        cmds.set_blend(BlendMode::Opaque);

        if self.render_path() == RenderPath::EffectPass {
            // render_path() guarantees the resources exist
            if let (Some(res), Some(source)) = (self.effect.resources(), source) {
                let prev_viewport = cmds.viewport();
                cmds.set_scissor(None);
                cmds.set_render_target(Some(res.target));
                cmds.set_dither(false);
                cmds.clear();
                cmds.run_effect(res.program, source);
                cmds.set_render_target(None);
                cmds.set_dither(true);
                cmds.set_viewport(prev_viewport);
            }
        }

        cmds.bind_quad_program(mode);
        cmds.set_sampler(if self.linear_filter {
            TextureSampler::NoMipClamp
        } else {
            TextureSampler::NoLinearNoMipClamp
        });
        cmds.draw_image(image, self.rect.world, TexRect::unit());

        self.video.borrow_mut().add_fence(cmds);

        self.overlay.draw(cmds);
    }

    /// Re-bind the image the layer presents
    ///
    /// Picks the effect target when an effect is active, otherwise the
    /// video source's image; recompiles the default quad programs and
    /// resynchronizes the effect target first so the binding is never
    /// stale.
    pub fn reset_image(&mut self) {
        let size = self.video.borrow().size();
        {
            let mut renderer = self.renderer.borrow_mut();
            renderer.compile_quad_programs();
            self.effect.sync_size(&mut *renderer, size);
        }
        let source = self.video.borrow().image();
        self.display_image = self.effect.resources().map(|res| res.image).or(source);
        log::debug!("Display image re-bound to {:?}", self.display_image);
    }

    /// Select a shader effect, rebuilding its resources
    pub fn set_effect(&mut self, kind: EffectKind) {
        let size = self.video.borrow().size();
        self.effect
            .select(&mut *self.renderer.borrow_mut(), kind, size);
        self.reset_image();
    }

    /// Change the effect render-target bit depth
    pub fn set_effect_bit_depth(&mut self, bits: u8) {
        let size = self.video.borrow().size();
        self.effect
            .set_bit_depth(&mut *self.renderer.borrow_mut(), bits, size);
        self.reset_image();
    }

    /// Select an overlay mask
    pub fn set_overlay(&mut self, kind: OverlayKind) {
        self.overlay
            .select(&mut *self.renderer.borrow_mut(), kind);
        let size = self.video.borrow().size();
        self.overlay.place(self.rect.world, size);
    }

    /// Set the overlay blend intensity (clamped to 0..=1)
    pub fn set_overlay_intensity(&mut self, value: f32) {
        self.overlay.set_intensity(value);
    }

    /// Toggle linear filtering of the content texture
    pub fn set_linear_filter(&mut self, linear: bool) {
        self.linear_filter = linear;
        log::debug!(
            "Content filtering set to {}",
            if linear { "linear" } else { "nearest" }
        );
    }

    /// Set the content brightness multiplier (clamped to 0..=1)
    pub fn set_brightness(&mut self, value: f32) {
        self.brightness = value.clamp(0.0, 1.0);
    }

    /// Rebuild the whole image chain after a content restart
    ///
    /// Drops the effect, resets the video source's image, then restores
    /// the configured effect so no stale GPU binding survives a
    /// resolution change.
    pub fn reset(&mut self) {
        let configured = self.effect.kind();
        self.set_effect(EffectKind::Direct);
        self.video.borrow_mut().reset_image();
        self.set_effect(configured);
        log::info!("Video layer reset (effect {})", configured);
    }

    /// Apply a settings snapshot through the individual setters
    pub fn apply_settings(&mut self, settings: &VideoSettings) {
        self.set_effect_bit_depth(settings.effect_bit_depth);
        self.set_effect(settings.effect);
        self.set_overlay(settings.overlay);
        self.set_overlay_intensity(settings.overlay_intensity);
        self.set_linear_filter(settings.linear_filter);
        self.set_brightness(settings.brightness);
    }
}
