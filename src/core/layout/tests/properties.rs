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

//! Property tests for the placement math
//!
//! These exercise the universal guarantees: bounded corrected ratios,
//! exact integer multiples with a maximal scale factor, projection
//! round-trips, linear percentage scaling, and idempotent placement.

use crate::core::config::{AspectRatio, ZoomMode};
use crate::core::geom::{PixelRect, Projection};
use crate::core::layout::reconcile::finalize;
use crate::core::layout::resolver::{integer_scaled_rect, ratio_corrected_size, resolve};
use crate::core::source::ContentSize;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_corrected_ratio_is_bounded(w in 8u32..4096, h in 8u32..4096) {
        let size = ratio_corrected_size(ContentSize::new(w, h));
        let ratio = size.width as f32 / size.height as f32;
        prop_assert!(
            (0.8..2.0).contains(&ratio),
            "{}x{} corrected to {}x{} has ratio {}",
            w, h, size.width, size.height, ratio
        );
    }

    #[test]
    fn prop_correction_only_grows_axes(w in 8u32..4096, h in 8u32..4096) {
        let size = ratio_corrected_size(ContentSize::new(w, h));
        prop_assert!(size.width >= w);
        prop_assert!(size.height >= h);
        // One axis always stays untouched
        prop_assert!(size.width == w || size.height == h);
    }

    #[test]
    fn prop_integer_scale_is_exact_multiple(
        cw in 64u32..1024,
        ch in 64u32..1024,
        vw in 256i32..4096,
        vh in 256i32..4096,
    ) {
        let corrected = ratio_corrected_size(ContentSize::new(cw, ch));
        let viewport = PixelRect::with_size(0, 0, vw, vh);
        let rect = integer_scaled_rect(corrected, viewport);

        prop_assert_eq!(rect.width() % corrected.width as i32, 0);
        prop_assert_eq!(rect.height() % corrected.height as i32, 0);
        let sx = rect.width() / corrected.width as i32;
        let sy = rect.height() / corrected.height as i32;
        prop_assert_eq!(sx, sy);
        prop_assert!(sx >= 1);
    }

    #[test]
    fn prop_integer_scale_factor_is_maximal(
        cw in 64u32..512,
        ch in 64u32..512,
        vw in 512i32..4096,
        vh in 512i32..4096,
    ) {
        let corrected = ratio_corrected_size(ContentSize::new(cw, ch));
        let viewport = PixelRect::with_size(0, 0, vw, vh);
        let rect = integer_scaled_rect(corrected, viewport);
        let scale = rect.width() / corrected.width as i32;

        let content_aspect = corrected.width as f32 / corrected.height as f32;
        let viewport_aspect = vw as f32 / vh as f32;
        let (axis_content, axis_viewport) = if content_aspect > viewport_aspect {
            (corrected.width as i32, vw)
        } else {
            (corrected.height as i32, vh)
        };
        if scale * axis_content <= axis_viewport {
            // One more step must overflow the chosen axis
            prop_assert!((scale + 1) * axis_content > axis_viewport);
        } else {
            // Content larger than the viewport keeps the floor of 1
            prop_assert_eq!(scale, 1);
        }
    }

    #[test]
    fn prop_integer_scale_is_centered(
        cw in 64u32..512,
        ch in 64u32..512,
        vw in 512i32..4096,
        vh in 512i32..4096,
    ) {
        let corrected = ratio_corrected_size(ContentSize::new(cw, ch));
        let viewport = PixelRect::with_size(0, 0, vw, vh);
        let rect = integer_scaled_rect(corrected, viewport);
        // Integer division leaves at most one pixel of bias
        prop_assert!((rect.center_x() - viewport.center_x()).abs() <= 1);
        prop_assert!((rect.center_y() - viewport.center_y()).abs() <= 1);
    }

    #[test]
    fn prop_projection_rect_round_trip(
        vw in 64i32..4096,
        vh in 64i32..4096,
        x in 0i32..1024,
        y in 0i32..1024,
        w in 1i32..2048,
        h in 1i32..2048,
    ) {
        let proj = Projection::new(PixelRect::with_size(0, 0, vw, vh));
        let rect = PixelRect::with_size(x.min(vw - 1), y.min(vh - 1), w.min(vw), h.min(vh));
        prop_assert_eq!(proj.project_rect(proj.unproject_rect(rect)), rect);
    }

    #[test]
    fn prop_percent_zoom_scales_linearly(value in 10u8..=200) {
        let viewport = PixelRect::with_size(0, 0, 1920, 1080);
        let proj = Projection::new(viewport);
        let base = resolve(
            ContentSize::new(256, 224),
            None,
            None,
            ZoomMode::Percent(100),
            AspectRatio::STANDARD,
            viewport,
            &proj,
        );
        let zoomed = resolve(
            ContentSize::new(256, 224),
            None,
            None,
            ZoomMode::Percent(value),
            AspectRatio::STANDARD,
            viewport,
            &proj,
        );
        let factor = value as f32 / 100.0;
        prop_assert!((zoomed.world.width() - base.world.width() * factor).abs() < 1e-4);
        prop_assert!((zoomed.world.height() - base.world.height() * factor).abs() < 1e-4);
        prop_assert!(zoomed.world.center_x().abs() < 1e-4);
        prop_assert!(zoomed.world.center_y().abs() < 1e-4);
    }

    #[test]
    fn prop_placement_is_idempotent(
        cw in 1u32..1024,
        ch in 1u32..1024,
        vw in 64i32..4096,
        vh in 64i32..4096,
        mode in 0u8..3,
    ) {
        let zoom = match mode {
            0 => ZoomMode::Percent(100),
            1 => ZoomMode::IntegerOnly,
            _ => ZoomMode::IntegerOnlyY,
        };
        let viewport = PixelRect::with_size(0, 0, vw, vh);
        let proj = Projection::new(viewport);
        let run = || {
            let c = resolve(
                ContentSize::new(cw, ch),
                Some(256),
                Some(224),
                zoom,
                AspectRatio::STANDARD,
                viewport,
                &proj,
            );
            finalize(c, &proj)
        };
        prop_assert_eq!(run(), run());
    }
}
