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

//! Unit tests for the frame draw sequence

use super::fakes::{layer_with, FakeContent, FakeVideo, Op, RecordingCommands};
use crate::core::config::{EffectKind, OverlayKind, VideoSettings};
use crate::core::geom::{PixelRect, Projection};
use crate::core::layer::{RenderPath, VideoLayer};
use crate::core::render::{
    BlendMode, ColorMode, ImageId, ProgramId, TargetId, TexRect, TextureSampler,
};

fn viewport() -> PixelRect {
    PixelRect::new(0, 0, 1920, 1080)
}

/// Place 256x224 content and bind its image
fn ready(layer: &mut VideoLayer) {
    let vp = viewport();
    layer.place(vp, &Projection::new(vp), &VideoSettings::default(), None);
    layer.reset_image();
}

#[test]
fn test_draw_skips_before_started() {
    let mut content = FakeContent::started();
    content.started = false;
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), content);
    ready(&mut layer);
    let mut cmds = RecordingCommands::new(viewport());

    layer.draw(&mut cmds);

    assert!(cmds.ops.is_empty());
}

#[test]
fn test_draw_skips_with_empty_rect() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(0, 0), FakeContent::started());
    ready(&mut layer);
    let mut cmds = RecordingCommands::new(viewport());

    layer.draw(&mut cmds);

    assert!(cmds.ops.is_empty());
}

#[test]
fn test_draw_skips_without_display_image() {
    let (mut layer, video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    video.borrow_mut().image = None;
    ready(&mut layer);
    let mut cmds = RecordingCommands::new(viewport());

    layer.draw(&mut cmds);

    assert!(cmds.ops.is_empty());
}

#[test]
fn test_draw_direct_sequence() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    ready(&mut layer);
    let world = layer.content_rect().world;
    let mut cmds = RecordingCommands::new(viewport());

    layer.draw(&mut cmds);

    assert_eq!(
        cmds.ops,
        vec![
            Op::SetBlend(BlendMode::Opaque),
            Op::BindQuad(ColorMode::Replace),
            Op::SetSampler(TextureSampler::NoMipClamp),
            Op::Draw {
                image: ImageId(1000),
                rect: world,
                uv: TexRect::unit(),
            },
            Op::Fence,
        ]
    );
}

#[test]
fn test_draw_modulates_reduced_brightness() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    ready(&mut layer);
    layer.set_brightness(0.5);
    let mut cmds = RecordingCommands::new(viewport());

    layer.draw(&mut cmds);

    assert_eq!(cmds.ops[0], Op::SetColor(0.5, 0.5, 0.5, 1.0));
    assert!(cmds.ops.contains(&Op::BindQuad(ColorMode::Modulate)));
    assert!(!cmds.ops.contains(&Op::BindQuad(ColorMode::Replace)));
}

#[test]
fn test_draw_full_brightness_replaces() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    ready(&mut layer);
    layer.set_brightness(1.0);
    let mut cmds = RecordingCommands::new(viewport());

    layer.draw(&mut cmds);

    assert!(cmds.ops.contains(&Op::BindQuad(ColorMode::Replace)));
    assert!(cmds
        .position(|op| matches!(op, Op::SetColor(..)))
        .is_none());
}

#[test]
fn test_draw_nearest_sampler_without_linear_filter() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    ready(&mut layer);
    layer.set_linear_filter(false);
    let mut cmds = RecordingCommands::new(viewport());

    layer.draw(&mut cmds);

    assert!(cmds
        .ops
        .contains(&Op::SetSampler(TextureSampler::NoLinearNoMipClamp)));
}

#[test]
fn test_draw_effect_pass_sequence() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    layer.set_effect(EffectKind::Scale2x);
    ready(&mut layer);
    let world = layer.content_rect().world;
    let mut cmds = RecordingCommands::new(viewport());

    layer.draw(&mut cmds);

    // Fresh renderer hands out ids in creation order: the effect
    // program, then the target and its image
    assert_eq!(
        cmds.ops,
        vec![
            Op::SetBlend(BlendMode::Opaque),
            Op::SetScissor(None),
            Op::SetTarget(Some(TargetId(2))),
            Op::SetDither(false),
            Op::Clear,
            Op::RunEffect(ProgramId(1), ImageId(1000)),
            Op::SetTarget(None),
            Op::SetDither(true),
            Op::SetViewport(viewport()),
            Op::BindQuad(ColorMode::Replace),
            Op::SetSampler(TextureSampler::NoMipClamp),
            Op::Draw {
                image: ImageId(3),
                rect: world,
                uv: TexRect::unit(),
            },
            Op::Fence,
        ]
    );
}

#[test]
fn test_draw_falls_back_when_compile_fails() {
    let (mut layer, _video, _content, renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    renderer.borrow_mut().fail_effects = true;
    layer.set_effect(EffectKind::Scale2x);
    ready(&mut layer);
    let mut cmds = RecordingCommands::new(viewport());

    layer.draw(&mut cmds);

    // The choice is remembered but drawing bypasses the effect
    assert_eq!(layer.effect_kind(), EffectKind::Scale2x);
    assert_eq!(layer.render_path(), RenderPath::DirectDraw);
    assert!(cmds
        .position(|op| matches!(op, Op::RunEffect(..)))
        .is_none());
    assert!(matches!(
        cmds.draws()[0],
        Op::Draw {
            image: ImageId(1000),
            ..
        }
    ));
}

#[test]
fn test_draw_overlay_draws_last() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    layer.set_overlay(OverlayKind::Scanlines);
    ready(&mut layer);
    let world = layer.content_rect().world;
    let mut cmds = RecordingCommands::new(viewport());

    layer.draw(&mut cmds);

    let fence = cmds.position(|op| *op == Op::Fence).unwrap();
    assert_eq!(
        &cmds.ops[fence + 1..],
        &[
            Op::SetBlend(BlendMode::Alpha),
            Op::SetColor(1.0, 1.0, 1.0, 0.25),
            Op::BindQuad(ColorMode::Modulate),
            Op::SetSampler(TextureSampler::NoMipRepeat),
            Op::Draw {
                image: ImageId(1),
                rect: world,
                uv: TexRect::repeated_v(224.0),
            },
        ]
    );
}

#[test]
fn test_draw_skips_zero_intensity_overlay() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    layer.set_overlay(OverlayKind::Scanlines);
    layer.set_overlay_intensity(0.0);
    ready(&mut layer);
    let mut cmds = RecordingCommands::new(viewport());

    layer.draw(&mut cmds);

    assert_eq!(cmds.draws().len(), 1);
    assert_eq!(*cmds.ops.last().unwrap(), Op::Fence);
}

#[test]
fn test_draw_requests_video_fence() {
    let (mut layer, video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    ready(&mut layer);
    let mut cmds = RecordingCommands::new(viewport());

    layer.draw(&mut cmds);

    assert_eq!(video.borrow().fences, 1);
    assert_eq!(cmds.ops.iter().filter(|op| **op == Op::Fence).count(), 1);
}
