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

//! Shader-effect state
//!
//! A non-direct effect owns two renderer resources: a compiled program
//! and an offscreen render target sized to the content dimensions times
//! the effect's scale factor. Selecting a different effect or resizing
//! the content recreates exactly what changed; selecting
//! [`EffectKind::Direct`] releases everything and the layer falls back
//! to drawing the content texture as-is. Compilation failure is a
//! logged fallback, never an error.

use crate::core::config::EffectKind;
use crate::core::render::{ImageId, ProgramId, Renderer, TargetId};
use crate::core::source::ContentSize;

/// GPU resources backing an active effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectResources {
    /// Compiled effect program
    pub program: ProgramId,
    /// Offscreen render target the effect draws into
    pub target: TargetId,
    /// Sampleable image of the target, presented by the layer
    pub image: ImageId,
    /// Target dimensions in pixels
    pub size: ContentSize,
}

/// Effect selection and resource lifecycle owned by the video layer
#[derive(Debug)]
pub struct EffectState {
    kind: EffectKind,
    bit_depth: u8,
    resources: Option<EffectResources>,
}

impl EffectState {
    /// Direct drawing, 16-bit targets
    pub fn new() -> Self {
        Self {
            kind: EffectKind::Direct,
            bit_depth: 16,
            resources: None,
        }
    }

    /// The selected effect kind (the user's choice, even if compilation
    /// failed and drawing currently bypasses the effect)
    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    /// Render-target bit depth (16 or 24)
    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    /// Resources of the active effect, if one is fully set up
    pub fn resources(&self) -> Option<EffectResources> {
        self.resources
    }

    /// Whether draws should go through the effect pass
    pub fn is_active(&self) -> bool {
        self.resources.is_some()
    }

    fn target_size(&self, content: ContentSize) -> ContentSize {
        let factor = self.kind.scale_factor();
        ContentSize::new(content.width * factor, content.height * factor)
    }

    /// Select an effect kind, building its program and target
    ///
    /// Re-selecting the current kind is a no-op once its resources
    /// exist, so repeated settings application never churns GPU
    /// resources.
    pub fn select(&mut self, renderer: &mut dyn Renderer, kind: EffectKind, content: ContentSize) {
        if kind == self.kind && (self.resources.is_some() || kind.is_direct()) {
            return;
        }
        self.release(renderer);
        self.kind = kind;
        if kind.is_direct() {
            log::info!("Effect disabled, drawing directly");
            return;
        }
        if content.is_zero() {
            // Program and target get built on the first size sync
            return;
        }
        let Some(program) = renderer.compile_effect(kind) else {
            log::warn!("Effect {} failed to compile, drawing directly", kind);
            return;
        };
        let size = self.target_size(content);
        let (target, image) = renderer.create_render_target(size.width, size.height, self.bit_depth);
        self.resources = Some(EffectResources {
            program,
            target,
            image,
            size,
        });
        log::info!(
            "Effect set to {} ({}x{} target, {}-bit)",
            kind,
            size.width,
            size.height,
            self.bit_depth
        );
    }

    /// Resynchronize the render target to the current content size
    ///
    /// Recreates only the target when the size changed; builds the whole
    /// effect when content arrived after a zero-size `select`.
    pub fn sync_size(&mut self, renderer: &mut dyn Renderer, content: ContentSize) {
        if self.kind.is_direct() || content.is_zero() {
            return;
        }
        let wanted = self.target_size(content);
        match self.resources {
            Some(res) if res.size == wanted => {}
            Some(res) => {
                renderer.drop_render_target(res.target);
                let (target, image) =
                    renderer.create_render_target(wanted.width, wanted.height, self.bit_depth);
                self.resources = Some(EffectResources {
                    program: res.program,
                    target,
                    image,
                    size: wanted,
                });
                log::debug!("Effect target resized to {}x{}", wanted.width, wanted.height);
            }
            None => {
                // Deferred setup; reuse the full selection path
                let kind = self.kind;
                self.select(renderer, kind, content);
            }
        }
    }

    /// Change the target bit depth, recreating the target if one exists
    pub fn set_bit_depth(&mut self, renderer: &mut dyn Renderer, bits: u8, content: ContentSize) {
        let bits = if bits <= 16 { 16 } else { 24 };
        if bits == self.bit_depth {
            return;
        }
        self.bit_depth = bits;
        if let Some(res) = self.resources.take() {
            renderer.drop_render_target(res.target);
            let size = self.target_size(content);
            let (target, image) = renderer.create_render_target(size.width, size.height, bits);
            self.resources = Some(EffectResources {
                program: res.program,
                target,
                image,
                size,
            });
        }
        log::info!("Effect bit depth set to {}", bits);
    }

    /// Release the program and target, keeping the selected kind
    fn release(&mut self, renderer: &mut dyn Renderer) {
        if let Some(res) = self.resources.take() {
            renderer.drop_render_target(res.target);
            renderer.drop_program(res.program);
        }
    }
}

impl Default for EffectState {
    fn default() -> Self {
        Self::new()
    }
}
