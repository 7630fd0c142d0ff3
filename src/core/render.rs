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

//! Renderer contract
//!
//! The video layer never talks to a GPU API directly. It drives two
//! traits: [`Renderer`] for resource lifecycle (images, offscreen render
//! targets, shader programs) and [`RenderCommands`] for the per-frame
//! draw sequence. The wgpu backend in `frontend::renderer` implements
//! both; tests implement them with recording fakes.
//!
//! Handles are opaque integers owned by the backend. A dropped or stale
//! handle is a logged no-op on the backend side, never a panic.

use crate::core::config::EffectKind;
use crate::core::geom::{PixelRect, WorldRect};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Handle to a sampleable image owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

/// Handle to a compiled shader program owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u64);

/// Handle to an offscreen render target owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// Color application mode of the common textured-quad program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Output the texture sample unmodified
    Replace,
    /// Multiply the texture sample by the current constant color
    Modulate,
}

/// Blend state for quad draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Overwrite the destination
    Opaque,
    /// Standard source-alpha blending
    Alpha,
}

/// Common texture samplers
///
/// Names describe the sampler configuration: mip-mapping is never used
/// for emulated content, "no linear" selects nearest-neighbor
/// magnification, and clamp/repeat is the address mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSampler {
    /// Linear filtering, clamped addressing
    NoMipClamp,
    /// Nearest-neighbor filtering, clamped addressing
    NoLinearNoMipClamp,
    /// Linear filtering, repeating addressing (overlay masks)
    NoMipRepeat,
    /// Nearest-neighbor filtering, repeating addressing
    NoLinearNoMipRepeat,
}

/// Texture coordinate window for a quad draw
///
/// `(u, v)` is sampled at the quad's top-left corner and `(u2, v2)` at
/// the bottom-right; texel rows grow downward, so the unit window draws
/// an uploaded image upright. Values beyond 1.0 repeat with a repeating
/// sampler, which is how overlay masks tile once per content line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexRect {
    pub u: f32,
    pub v: f32,
    pub u2: f32,
    pub v2: f32,
}

impl TexRect {
    /// The full texture, drawn once
    pub fn unit() -> Self {
        Self {
            u: 0.0,
            v: 0.0,
            u2: 1.0,
            v2: 1.0,
        }
    }

    /// The full texture width, repeated `times` along v
    pub fn repeated_v(times: f32) -> Self {
        Self {
            u: 0.0,
            v: 0.0,
            u2: 1.0,
            v2: times,
        }
    }
}

impl Default for TexRect {
    fn default() -> Self {
        Self::unit()
    }
}

/// Completion fence tied to a submitted command batch
///
/// Cloned fences share one signal. Backends flip the signal when the GPU
/// finishes the batch the fence was inserted into; callers poll
/// [`Fence::is_signaled`] for frame pacing and never block inside the
/// layer.
#[derive(Debug, Clone)]
pub struct Fence {
    flag: Arc<AtomicBool>,
}

impl Fence {
    /// A fence that has not signaled yet
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A fence that is already signaled (for backends with no async work)
    pub fn signaled() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Mark the fenced batch as complete
    pub fn signal(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether the fenced batch has completed
    pub fn is_signaled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Default for Fence {
    fn default() -> Self {
        Self::new()
    }
}

/// Resource lifecycle side of the renderer
///
/// All creation methods are infallible at the contract level: shader
/// compilation failure yields `None` (the caller falls back to direct
/// drawing) and resource operations on stale handles are logged no-ops.
pub trait Renderer {
    /// Backend name for diagnostics
    fn name(&self) -> &str;

    /// Upload an RGBA8 image and return its handle
    fn upload_image(&mut self, pixels: &[u8], width: u32, height: u32) -> ImageId;

    /// Replace the contents of an uploaded image (same dimensions)
    fn update_image(&mut self, image: ImageId, pixels: &[u8]);

    /// Release an uploaded image
    fn drop_image(&mut self, image: ImageId);

    /// Create an offscreen render target and its sampleable image
    ///
    /// `bit_depth` (16 or 24) is a storage hint; backends without a
    /// renderable 16-bit format may promote to a wider one.
    fn create_render_target(&mut self, width: u32, height: u32, bit_depth: u8)
        -> (TargetId, ImageId);

    /// Release a render target and its image
    fn drop_render_target(&mut self, target: TargetId);

    /// Compile the program for an effect kind
    ///
    /// Returns `None` when compilation fails; the failure is logged by
    /// the backend and the caller degrades to direct drawing.
    fn compile_effect(&mut self, kind: EffectKind) -> Option<ProgramId>;

    /// Release a compiled effect program
    fn drop_program(&mut self, program: ProgramId);

    /// Compile the default textured-quad programs (replace and modulate)
    ///
    /// Idempotent; called whenever the drawn image is re-bound.
    fn compile_quad_programs(&mut self);
}

/// Per-frame draw command recording
///
/// One instance covers one command batch. State set here (color, blend,
/// program, sampler, target, scissor, dither, viewport) applies to
/// subsequent draws within the batch only.
pub trait RenderCommands {
    /// Set the constant color multiplied into modulate-mode draws
    fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32);

    /// Set the blend state for subsequent draws
    fn set_blend(&mut self, blend: BlendMode);

    /// Bind the common textured-quad program variant
    fn bind_quad_program(&mut self, mode: ColorMode);

    /// Select the sampler used for subsequent texture lookups
    fn set_sampler(&mut self, sampler: TextureSampler);

    /// Redirect draws to an offscreen target, or back to the surface
    fn set_render_target(&mut self, target: Option<TargetId>);

    /// Restrict draws to a pixel rectangle, or disable the restriction
    fn set_scissor(&mut self, rect: Option<PixelRect>);

    /// Toggle the backend's output dither stage, where one exists
    ///
    /// Backends without a dither stage treat this as a hint and may
    /// ignore it; the call is still recorded for contract tests.
    fn set_dither(&mut self, enabled: bool);

    /// Set the viewport for subsequent draws
    fn set_viewport(&mut self, rect: PixelRect);

    /// The currently active viewport
    fn viewport(&self) -> PixelRect;

    /// Clear the currently bound target to opaque black
    fn clear(&mut self);

    /// Draw `image` as a quad covering `rect`, sampling `uv`
    fn draw_image(&mut self, image: ImageId, rect: WorldRect, uv: TexRect);

    /// Run an effect program over `src` into the bound render target
    fn run_effect(&mut self, program: ProgramId, src: ImageId);

    /// Insert a completion fence tied to this batch
    fn insert_fence(&mut self) -> Fence;
}
