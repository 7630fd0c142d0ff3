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

//! Unit tests for layer-level content placement

use super::fakes::{layer_with, FakeContent, FakeVideo};
use crate::core::config::{AspectRatio, EffectKind, VideoSettings, ZoomMode};
use crate::core::controls::{Anchor, TouchLayout};
use crate::core::geom::{PixelRect, Projection};
use crate::core::source::ContentSize;

fn landscape_1080p() -> PixelRect {
    PixelRect::new(0, 0, 1920, 1080)
}

fn portrait_1080p() -> PixelRect {
    PixelRect::new(0, 0, 1080, 1920)
}

fn integer_settings() -> VideoSettings {
    VideoSettings {
        zoom: ZoomMode::IntegerOnly,
        ..VideoSettings::default()
    }
}

#[test]
fn test_place_zero_size_content_yields_empty_rect() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(0, 0), FakeContent::started());
    let viewport = landscape_1080p();
    let proj = Projection::new(viewport);

    layer.place(viewport, &proj, &integer_settings(), None);

    assert!(layer.content_rect().is_empty());
    assert_eq!(layer.content_rect().pixel, PixelRect::default());
}

#[test]
fn test_place_integer_zoom_256x224_at_1080p() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    let viewport = landscape_1080p();
    let proj = Projection::new(viewport);

    layer.place(viewport, &proj, &integer_settings(), None);

    let rect = layer.content_rect();
    assert_eq!(rect.pixel, PixelRect::new(448, 92, 1472, 988));
    assert_eq!(rect.world, proj.unproject_rect(rect.pixel));
}

#[test]
fn test_place_halves_multires_width() {
    let mut content = FakeContent::started();
    content.base_width = Some(256);
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(512, 224), content);
    let viewport = landscape_1080p();
    let proj = Projection::new(viewport);

    layer.place(viewport, &proj, &integer_settings(), None);

    // 512x224 over a 256-wide base lays out like 256x224
    assert_eq!(layer.content_rect().pixel, PixelRect::new(448, 92, 1472, 988));
}

#[test]
fn test_place_not_running_keeps_previous_rect() {
    let (mut layer, _video, content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    let viewport = landscape_1080p();
    let proj = Projection::new(viewport);
    layer.place(viewport, &proj, &integer_settings(), None);
    let placed = layer.content_rect();

    content.borrow_mut().running = false;
    let smaller = PixelRect::new(0, 0, 1280, 720);
    layer.place(smaller, &Projection::new(smaller), &integer_settings(), None);

    assert_eq!(layer.content_rect().pixel, placed.pixel);
    assert_eq!(layer.content_rect().world, placed.world);
}

#[test]
fn test_place_is_idempotent() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    let viewport = landscape_1080p();
    let proj = Projection::new(viewport);
    let settings = VideoSettings::default();

    layer.place(viewport, &proj, &settings, None);
    let first = layer.content_rect();
    layer.place(viewport, &proj, &settings, None);

    assert_eq!(layer.content_rect().pixel, first.pixel);
    assert_eq!(layer.content_rect().world, first.world);
}

#[test]
fn test_place_percent_zoom_world_best_fit() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    let viewport = landscape_1080p();
    let proj = Projection::new(viewport);

    layer.place(viewport, &proj, &VideoSettings::default(), None);

    // 4:3 content on a 16:9 plane is height-bound
    let rect = layer.content_rect();
    assert!((rect.world.height() - 2.0).abs() < 1e-4);
    assert!((rect.world.width() - 8.0 / 3.0).abs() < 1e-4);
    assert_eq!(rect.pixel, PixelRect::new(240, 0, 1680, 1080));
}

#[test]
fn test_place_half_percent_zoom_halves_the_rect() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    let viewport = landscape_1080p();
    let proj = Projection::new(viewport);
    let settings = VideoSettings {
        zoom: ZoomMode::Percent(50),
        ..VideoSettings::default()
    };

    layer.place(viewport, &proj, &settings, None);

    let rect = layer.content_rect();
    assert!((rect.world.width() - 4.0 / 3.0).abs() < 1e-4);
    assert!((rect.world.height() - 1.0).abs() < 1e-4);
    assert_eq!(rect.pixel.width(), 720);
    assert_eq!(rect.pixel.center_x(), 960);
}

#[test]
fn test_place_fill_aspect_covers_the_plane() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    let viewport = landscape_1080p();
    let proj = Projection::new(viewport);
    let settings = VideoSettings {
        aspect: AspectRatio::FILL,
        ..VideoSettings::default()
    };

    layer.place(viewport, &proj, &settings, None);

    assert_eq!(layer.content_rect().pixel, viewport);
}

#[test]
fn test_place_avoids_top_anchored_controls() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    let viewport = portrait_1080p();
    let proj = Projection::new(viewport);
    let touch = TouchLayout {
        enabled: true,
        dpad_portrait: Anchor::TOP | Anchor::LEFT,
        face_portrait: Anchor::TOP | Anchor::RIGHT,
        ..TouchLayout::default()
    };

    layer.place(viewport, &proj, &integer_settings(), Some(&touch));

    // Both control groups on top push content down to one button above
    // the bottom edge
    let pixel = layer.content_rect().pixel;
    assert_eq!(pixel.y2, 1920 - 96);
    assert_eq!(pixel.height(), 896);
}

#[test]
fn test_place_moves_content_up_for_bottom_controls() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    let viewport = portrait_1080p();
    let proj = Projection::new(viewport);
    let touch = TouchLayout {
        enabled: true,
        ..TouchLayout::default()
    };

    layer.place(viewport, &proj, &integer_settings(), Some(&touch));

    assert_eq!(layer.content_rect().pixel.y, 96);
}

#[test]
fn test_place_centers_between_opposite_controls() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    let viewport = portrait_1080p();
    let proj = Projection::new(viewport);
    let touch = TouchLayout {
        enabled: true,
        dpad_portrait: Anchor::TOP | Anchor::LEFT,
        face_portrait: Anchor::BOTTOM | Anchor::RIGHT,
        ..TouchLayout::default()
    };

    layer.place(viewport, &proj, &integer_settings(), Some(&touch));

    // 1024x896 centered in 1080x1920
    assert_eq!(layer.content_rect().pixel.y, 512);
}

#[test]
fn test_place_ignores_controls_in_landscape() {
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    let viewport = landscape_1080p();
    let proj = Projection::new(viewport);
    let touch = TouchLayout {
        enabled: true,
        ..TouchLayout::default()
    };

    layer.place(viewport, &proj, &integer_settings(), Some(&touch));

    assert_eq!(layer.content_rect().pixel, PixelRect::new(448, 92, 1472, 988));
}

#[test]
fn test_place_ignores_controls_when_inapplicable() {
    let mut content = FakeContent::started();
    content.touch_applicable = false;
    let (mut layer, _video, _content, _renderer) =
        layer_with(FakeVideo::new(256, 224), content);
    let viewport = portrait_1080p();
    let proj = Projection::new(viewport);
    let touch = TouchLayout {
        enabled: true,
        ..TouchLayout::default()
    };

    layer.place(viewport, &proj, &integer_settings(), Some(&touch));

    assert_eq!(layer.content_rect().pixel.y, 512);
}

#[test]
fn test_place_resizes_effect_target() {
    let (mut layer, video, _content, renderer) =
        layer_with(FakeVideo::new(256, 224), FakeContent::started());
    let viewport = landscape_1080p();
    let proj = Projection::new(viewport);
    layer.set_effect(EffectKind::Scale2x);
    assert_eq!(renderer.borrow().created_targets, vec![(512, 448, 16)]);

    video.borrow_mut().size = ContentSize::new(320, 240);
    layer.place(viewport, &proj, &VideoSettings::default(), None);

    let renderer = renderer.borrow();
    assert_eq!(renderer.created_targets.last(), Some(&(640, 480, 16)));
    assert_eq!(renderer.live_targets.len(), 1);
}
