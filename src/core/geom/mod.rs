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

//! Geometry primitives
//!
//! Two coordinate spaces cover everything the video layer does:
//!
//! - **Pixel space**: integer coordinates, origin top-left, y down.
//!   Viewports, integer-scaled content rectangles, and touch-control
//!   bounds live here.
//! - **World space**: `f32` coordinates, origin at the plane center,
//!   y up. Final GPU quad placement lives here.
//!
//! [`Projection`] converts between the two for a given viewport.

mod projection;
mod rect;

pub use projection::Projection;
pub use rect::{PixelRect, WorldRect};
