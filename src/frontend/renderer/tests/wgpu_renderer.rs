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

//! Unit tests for wgpu backend geometry clamping

use crate::core::geom::PixelRect;
use crate::frontend::renderer::wgpu_renderer::clamp_rect;

#[test]
fn test_clamp_rect_inside_passes_through() {
    let rect = PixelRect::new(10, 20, 110, 120);
    assert_eq!(clamp_rect(rect, 640, 480), Some(rect));
}

#[test]
fn test_clamp_rect_trims_overflow() {
    let rect = PixelRect::new(-16, -16, 700, 500);
    assert_eq!(clamp_rect(rect, 640, 480), Some(PixelRect::new(0, 0, 640, 480)));
}

#[test]
fn test_clamp_rect_outside_is_none() {
    assert_eq!(clamp_rect(PixelRect::new(700, 0, 800, 100), 640, 480), None);
    assert_eq!(clamp_rect(PixelRect::new(0, 500, 100, 600), 640, 480), None);
}

#[test]
fn test_clamp_rect_empty_is_none() {
    assert_eq!(clamp_rect(PixelRect::default(), 640, 480), None);
    assert_eq!(clamp_rect(PixelRect::new(50, 50, 50, 200), 640, 480), None);
}
