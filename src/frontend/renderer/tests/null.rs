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

//! Unit tests for the null renderer

use crate::core::config::EffectKind;
use crate::core::geom::PixelRect;
use crate::core::render::{RenderCommands, Renderer};
use crate::frontend::renderer::{NullCommands, NullRenderer};

#[test]
fn test_null_renderer_allocates_distinct_handles() {
    let mut renderer = NullRenderer::default();
    let first = renderer.upload_image(&[0; 4], 1, 1);
    let second = renderer.upload_image(&[0; 4], 1, 1);
    assert_ne!(first, second);
    assert_eq!(renderer.name(), "null");
}

#[test]
fn test_null_renderer_target_pairs_image() {
    let mut renderer = NullRenderer::default();
    let (target, image) = renderer.create_render_target(512, 448, 16);
    assert_ne!(target.0, image.0);

    // Dropping the target also retires its image
    renderer.drop_render_target(target);
    renderer.update_image(image, &[]); // logs, does not panic
}

#[test]
fn test_null_renderer_compiles_every_effect() {
    let mut renderer = NullRenderer::default();
    assert!(renderer.compile_effect(EffectKind::Direct).is_none());
    assert!(renderer.compile_effect(EffectKind::Scale2x).is_some());
    assert!(renderer.compile_effect(EffectKind::Prescale2x).is_some());
}

#[test]
fn test_null_commands_keep_viewport() {
    let mut cmds = NullCommands::new(PixelRect::new(0, 0, 640, 480));
    assert_eq!(cmds.viewport(), PixelRect::new(0, 0, 640, 480));

    cmds.set_viewport(PixelRect::new(0, 0, 1920, 1080));
    assert_eq!(cmds.viewport(), PixelRect::new(0, 0, 1920, 1080));
}

#[test]
fn test_null_commands_fence_is_presignaled() {
    let mut cmds = NullCommands::new(PixelRect::default());
    assert!(cmds.insert_fence().is_signaled());
}
