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

//! retroframe: an emulator front-end framework
//!
//! This crate provides the presentation side of an emulator: it takes
//! frames an emulated system produces and puts them on screen with the
//! zoom, aspect-ratio, shader-effect and overlay treatment the user
//! configured, plus the surrounding conveniences a front-end needs
//! (save slots, key-binding profiles, audio device queries).
//!
//! # Architecture
//!
//! - [`core`]: renderer-agnostic composition and configuration logic
//! - [`frontend`]: the wgpu/winit/egui shell that drives it
//!
//! The emulated system plugs in through three small traits:
//! [`core::source::VideoSource`] (frames), [`core::source::ContentSource`]
//! (run state), and optionally [`core::controls::TouchControls`]
//! (on-screen controller geometry).
//!
//! # Example
//!
//! ```no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use retroframe::core::config::VideoSettings;
//! use retroframe::core::geom::{PixelRect, Projection};
//! use retroframe::core::layer::VideoLayer;
//! use retroframe::frontend::pattern::TestPattern;
//! use retroframe::frontend::renderer::NullRenderer;
//!
//! let system = Rc::new(RefCell::new(TestPattern::new(256, 224)));
//! let renderer = Rc::new(RefCell::new(NullRenderer::default()));
//! let mut layer = VideoLayer::new(system.clone(), system.clone(), renderer);
//!
//! let viewport = PixelRect::new(0, 0, 1920, 1080);
//! layer.place(
//!     viewport,
//!     &Projection::new(viewport),
//!     &VideoSettings::default(),
//!     None,
//! );
//! ```
//!
//! # Error Handling
//!
//! Composition never fails: degraded inputs turn into logged no-ops.
//! Operations that touch files or devices return
//! [`core::error::Result<T>`], an alias for
//! `Result<T, FrontendError>`.

pub mod core;
pub mod frontend;

// Re-export commonly used types
pub use core::error::{FrontendError, Result};
