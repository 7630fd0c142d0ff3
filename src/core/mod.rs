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

//! Core front-end components
//!
//! Everything in here is GPU-API and window-system agnostic:
//!
//! - [`layer`]: the video layer compositing emulated output
//! - [`layout`]: content placement (zoom, aspect, touch avoidance)
//! - [`geom`]: pixel/world rectangles and the projection between them
//! - [`render`]: the renderer contract the layer draws through
//! - [`source`]: video and content source collaborator traits
//! - [`controls`]: touch-control queries used during placement
//! - [`config`]: persisted video settings
//! - [`slots`]: save-slot store
//! - [`input`]: key-configuration model
//! - [`error`]: shared error type

pub mod config;
pub mod controls;
pub mod error;
pub mod geom;
pub mod input;
pub mod layer;
pub mod layout;
pub mod render;
pub mod slots;
pub mod source;
