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

//! Frame timing module
//!
//! This module provides frame timing utilities for pacing the demo
//! content and window redraws. It tracks frame time, FPS, and
//! determines when the next frame is due, so the event loop can sleep
//! with `ControlFlow::WaitUntil` instead of spinning.

use std::time::{Duration, Instant};

/// Frame timer for steady content pacing
///
/// Tracks frame timing and FPS, and reports when the next frame should
/// be executed. The frame counter doubles as the animation clock for
/// the built-in test pattern.
///
/// # Example
///
/// ```
/// use retroframe::frontend::FrameTimer;
///
/// let mut timer = FrameTimer::new(60);
///
/// loop {
///     if timer.should_run_frame() {
///         // Advance content and redraw
///         timer.tick();
///         println!("FPS: {:.1}, Frame time: {:.2}ms", timer.fps(), timer.frame_time_ms());
///     }
///     # break;
/// }
/// ```
pub struct FrameTimer {
    /// Minimum time between frames
    target_frame_time: Duration,
    /// Time when the last frame was executed
    last_frame: Instant,
    /// Total number of frames executed
    frame_count: u64,
    /// Current FPS (frames per second)
    fps: f32,
    /// Current frame time in milliseconds
    frame_time_ms: f32,
    /// Time when FPS calculation started
    fps_start: Instant,
    /// Frames since last FPS calculation
    fps_frame_count: u64,
}

impl FrameTimer {
    /// Create a new FrameTimer
    ///
    /// # Arguments
    ///
    /// * `target_fps` - Target frames per second (typically 60, must be > 0)
    ///
    /// # Returns
    ///
    /// A new `FrameTimer` instance configured for the target FPS
    ///
    /// # Panics
    ///
    /// Panics if `target_fps` is 0
    ///
    /// # Example
    ///
    /// ```
    /// use retroframe::frontend::FrameTimer;
    ///
    /// let timer = FrameTimer::new(60);
    /// assert_eq!(timer.fps(), 0.0); // No frames executed yet
    /// ```
    pub fn new(target_fps: u32) -> Self {
        assert!(target_fps > 0, "target_fps must be greater than 0");
        let target_frame_time = Duration::from_nanos(1_000_000_000 / target_fps as u64);
        let now = Instant::now();

        Self {
            target_frame_time,
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
            frame_time_ms: 0.0,
            fps_start: now,
            fps_frame_count: 0,
        }
    }

    /// Update frame timing after executing a frame
    ///
    /// Call this immediately after running a frame to update timing
    /// statistics. FPS and frame time refresh approximately once per
    /// second for smooth readings.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);

        // Update frame time in milliseconds
        self.frame_time_ms = elapsed.as_secs_f32() * 1000.0;

        // Update frame counter
        self.frame_count += 1;
        self.fps_frame_count += 1;

        // Calculate FPS approximately once per second
        let fps_elapsed = now.duration_since(self.fps_start);
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_start = now;
        }

        self.last_frame = now;
    }

    /// Check if a new frame should be executed
    ///
    /// Returns true if enough time has passed since the last frame to
    /// maintain the target frame rate.
    ///
    /// # Example
    ///
    /// ```
    /// use retroframe::frontend::FrameTimer;
    ///
    /// let mut timer = FrameTimer::new(60);
    /// if timer.should_run_frame() {
    ///     timer.tick();
    /// }
    /// ```
    #[inline(always)]
    pub fn should_run_frame(&self) -> bool {
        let elapsed = Instant::now().duration_since(self.last_frame);
        elapsed >= self.target_frame_time
    }

    /// Get the instant when the next frame should run
    ///
    /// Based on the last frame time and the target frame rate. Used for
    /// scheduling event loop wake-ups to avoid busy-waiting.
    ///
    /// # Example
    ///
    /// ```
    /// use retroframe::frontend::FrameTimer;
    /// use std::time::Instant;
    ///
    /// let timer = FrameTimer::new(60);
    /// let next_frame = timer.next_frame_instant();
    /// assert!(next_frame >= Instant::now());
    /// ```
    #[inline(always)]
    pub fn next_frame_instant(&self) -> Instant {
        self.last_frame + self.target_frame_time
    }

    /// Get the current FPS
    ///
    /// Updated approximately once per second.
    #[inline(always)]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get the current frame time in milliseconds
    #[inline(always)]
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    /// Get the total number of frames executed
    ///
    /// The test pattern uses this as its animation clock.
    #[inline(always)]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(60)
    }
}
