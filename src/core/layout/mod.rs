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

//! Content placement
//!
//! Turning "what the emulated system outputs" into "where it appears on
//! screen" happens in two stages:
//!
//! 1. [`resolver`] computes candidate rectangles: an integer-scaled
//!    pixel-space candidate and a continuous world-space candidate,
//!    stabilized against multires switching and extreme aspect ratios.
//! 2. [`reconcile`] picks the authoritative representation per axis for
//!    the active zoom mode, moves both candidates out of the touch
//!    overlay's way in portrait, and projects the derived axes so both
//!    representations agree.
//!
//! Everything here is pure; the [`VideoLayer`](crate::core::layer::VideoLayer)
//! orchestrates these functions and owns the resulting [`DisplayRect`].

pub mod reconcile;
pub mod resolver;

pub use reconcile::{AxisSource, AxisSources, DisplayRect};
pub use resolver::Candidates;

#[cfg(test)]
mod tests;
