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

//! Rendering subsystem
//!
//! This module provides the GPU side of the frontend. [`RenderContext`]
//! owns the wgpu device, queue and window surface. [`WgpuRenderer`] and
//! [`WgpuCommands`] implement the renderer contract from
//! [`crate::core::render`] on top of it: uploaded images and offscreen
//! targets become wgpu textures, effect programs become render
//! pipelines, and the per-frame command recording becomes render
//! passes on a shared command encoder.
//!
//! [`NullRenderer`] implements the same contract with no GPU behind it,
//! for headless use and documentation examples.

pub mod context;
pub mod null;
pub mod wgpu_renderer;

#[cfg(test)]
mod tests;

pub use context::RenderContext;
pub use null::{NullCommands, NullRenderer};
pub use wgpu_renderer::{WgpuCommands, WgpuRenderer};
