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

//! Placement pipeline benchmarks
//!
//! Measures candidate resolution, the touch-avoidance reconciliation
//! chain, and a full headless layer placement. Placement runs once per
//! frame, so these paths stay on the hot side of the frame budget.

use std::cell::RefCell;
use std::hint::black_box;
use std::rc::Rc;

use criterion::{criterion_group, criterion_main, Criterion};

use retroframe::core::config::{AspectRatio, VideoSettings, ZoomMode};
use retroframe::core::controls::TouchLayout;
use retroframe::core::geom::{PixelRect, Projection};
use retroframe::core::layer::VideoLayer;
use retroframe::core::layout::{reconcile, resolver};
use retroframe::core::render::Renderer;
use retroframe::core::source::{ContentSize, ContentSource, VideoSource};
use retroframe::frontend::pattern::TestPattern;
use retroframe::frontend::renderer::NullRenderer;

fn bench_resolve(c: &mut Criterion) {
    let viewport = PixelRect::with_size(0, 0, 1920, 1080);
    let proj = Projection::new(viewport);
    let size = ContentSize::new(320, 240);

    c.bench_function("resolve_integer_zoom", |b| {
        b.iter(|| {
            resolver::resolve(
                black_box(size),
                None,
                None,
                ZoomMode::IntegerOnly,
                AspectRatio::STANDARD,
                viewport,
                &proj,
            )
        })
    });

    c.bench_function("resolve_percent_zoom", |b| {
        b.iter(|| {
            resolver::resolve(
                black_box(size),
                None,
                None,
                ZoomMode::Percent(90),
                AspectRatio::WIDESCREEN,
                viewport,
                &proj,
            )
        })
    });
}

fn bench_portrait_touch_chain(c: &mut Criterion) {
    let viewport = PixelRect::with_size(0, 0, 1080, 1920);
    let proj = Projection::new(viewport);
    let size = ContentSize::new(256, 224);
    let touch = TouchLayout {
        enabled: true,
        ..TouchLayout::default()
    };

    c.bench_function("placement_portrait_touch", |b| {
        b.iter(|| {
            let mut candidates = resolver::resolve(
                black_box(size),
                None,
                None,
                ZoomMode::Percent(100),
                AspectRatio::STANDARD,
                viewport,
                &proj,
            );
            reconcile::avoid_touch_controls(&mut candidates, viewport, &proj, &touch, true);
            reconcile::finalize(candidates, &proj)
        })
    });
}

fn bench_layer_place(c: &mut Criterion) {
    let renderer = Rc::new(RefCell::new(NullRenderer::default()));
    let pattern = Rc::new(RefCell::new(TestPattern::new(256, 224)));
    let mut layer = VideoLayer::new(
        Rc::clone(&pattern) as Rc<RefCell<dyn VideoSource>>,
        Rc::clone(&pattern) as Rc<RefCell<dyn ContentSource>>,
        Rc::clone(&renderer) as Rc<RefCell<dyn Renderer>>,
    );
    let settings = VideoSettings::default();
    let viewport = PixelRect::with_size(0, 0, 1280, 720);
    let proj = Projection::new(viewport);

    c.bench_function("layer_place", |b| {
        b.iter(|| {
            layer.place(black_box(viewport), &proj, &settings, None);
            black_box(layer.content_rect())
        })
    });
}

criterion_group!(
    benches,
    bench_resolve,
    bench_portrait_touch_chain,
    bench_layer_place
);
criterion_main!(benches);
