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

//! Renderer with no GPU behind it
//!
//! [`NullRenderer`] honors the full renderer contract while touching no
//! graphics API: handles are allocated and tracked, every effect
//! "compiles", and draws go nowhere. It exists for headless runs and
//! documentation examples where constructing a wgpu device would be
//! noise.

use std::collections::{HashMap, HashSet};

use crate::core::config::EffectKind;
use crate::core::geom::{PixelRect, WorldRect};
use crate::core::render::{
    BlendMode, ColorMode, Fence, ImageId, ProgramId, RenderCommands, Renderer, TargetId, TexRect,
    TextureSampler,
};

/// Resource bookkeeping without resources
///
/// Tracks live handles so stale operations still get caught and logged,
/// exactly as the wgpu backend would.
#[derive(Debug, Default)]
pub struct NullRenderer {
    images: HashSet<u64>,
    targets: HashMap<u64, ImageId>,
    programs: HashSet<u64>,
    next_id: u64,
}

impl NullRenderer {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Renderer for NullRenderer {
    fn name(&self) -> &str {
        "null"
    }

    fn upload_image(&mut self, _pixels: &[u8], width: u32, height: u32) -> ImageId {
        let id = ImageId(self.next_id());
        self.images.insert(id.0);
        log::trace!("Null upload of {}x{} image as {:?}", width, height, id);
        id
    }

    fn update_image(&mut self, image: ImageId, _pixels: &[u8]) {
        if !self.images.contains(&image.0) {
            log::warn!("Update of stale image {:?}", image);
        }
    }

    fn drop_image(&mut self, image: ImageId) {
        if !self.images.remove(&image.0) {
            log::debug!("Drop of stale image {:?}", image);
        }
    }

    fn create_render_target(
        &mut self,
        _width: u32,
        _height: u32,
        _bit_depth: u8,
    ) -> (TargetId, ImageId) {
        let target = TargetId(self.next_id());
        let image = ImageId(self.next_id());
        self.images.insert(image.0);
        self.targets.insert(target.0, image);
        (target, image)
    }

    fn drop_render_target(&mut self, target: TargetId) {
        match self.targets.remove(&target.0) {
            Some(image) => {
                self.images.remove(&image.0);
            }
            None => log::debug!("Drop of stale render target {:?}", target),
        }
    }

    fn compile_effect(&mut self, kind: EffectKind) -> Option<ProgramId> {
        if kind.is_direct() {
            return None;
        }
        let id = ProgramId(self.next_id());
        self.programs.insert(id.0);
        Some(id)
    }

    fn drop_program(&mut self, program: ProgramId) {
        if !self.programs.remove(&program.0) {
            log::debug!("Drop of stale program {:?}", program);
        }
    }

    fn compile_quad_programs(&mut self) {}
}

/// Command recording that discards everything
///
/// Only the viewport is retained, because the video layer reads it back
/// when bracketing an effect pass.
#[derive(Debug, Clone)]
pub struct NullCommands {
    viewport: PixelRect,
}

impl NullCommands {
    /// Start a discarded batch over the given surface viewport
    pub fn new(viewport: PixelRect) -> Self {
        Self { viewport }
    }
}

impl RenderCommands for NullCommands {
    fn set_color(&mut self, _r: f32, _g: f32, _b: f32, _a: f32) {}

    fn set_blend(&mut self, _blend: BlendMode) {}

    fn bind_quad_program(&mut self, _mode: ColorMode) {}

    fn set_sampler(&mut self, _sampler: TextureSampler) {}

    fn set_render_target(&mut self, _target: Option<TargetId>) {}

    fn set_scissor(&mut self, _rect: Option<PixelRect>) {}

    fn set_dither(&mut self, _enabled: bool) {}

    fn set_viewport(&mut self, rect: PixelRect) {
        self.viewport = rect;
    }

    fn viewport(&self) -> PixelRect {
        self.viewport
    }

    fn clear(&mut self) {}

    fn draw_image(&mut self, _image: ImageId, _rect: WorldRect, _uv: TexRect) {}

    fn run_effect(&mut self, _program: ProgramId, _src: ImageId) {}

    fn insert_fence(&mut self) -> Fence {
        Fence::signaled()
    }
}
