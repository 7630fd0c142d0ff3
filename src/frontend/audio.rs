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

//! Audio device queries
//!
//! This module answers the questions an emulated system asks before it
//! opens an output stream: what format the device natively plays, which
//! audio APIs exist on this platform, and which API to actually use for
//! a possibly stale configured choice. All queries degrade to safe
//! defaults instead of failing, so audio setup never blocks startup.

use cpal::traits::{DeviceTrait, HostTrait};

/// Output format of an audio device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    /// Sample rate in Hz
    pub rate: u32,
    /// Channel count
    pub channels: u16,
    /// Sample type the device consumes
    pub sample_format: cpal::SampleFormat,
}

/// Format assumed when no device answers: 48 kHz stereo f32
pub const FALLBACK_FORMAT: AudioFormat = AudioFormat {
    rate: 48_000,
    channels: 2,
    sample_format: cpal::SampleFormat::F32,
};

/// Native output format of the default device
///
/// Falls back to [`FALLBACK_FORMAT`] when there is no output device or
/// it reports no default configuration.
pub fn native_format() -> AudioFormat {
    let format = cpal::default_host()
        .default_output_device()
        .and_then(|device| device.default_output_config().ok())
        .map(|config| AudioFormat {
            rate: config.sample_rate().0,
            channels: config.channels(),
            sample_format: config.sample_format(),
        });
    match format {
        Some(format) => format,
        None => {
            log::warn!(
                "No default audio output, assuming {} Hz {}ch",
                FALLBACK_FORMAT.rate,
                FALLBACK_FORMAT.channels
            );
            FALLBACK_FORMAT
        }
    }
}

/// Audio APIs compiled into this build, in cpal's order
pub fn audio_apis() -> Vec<cpal::HostId> {
    cpal::available_hosts()
}

/// Resolve a configured API choice against what is available
///
/// Returns `requested` when it is still present, otherwise the platform
/// default. `None` always maps to the default, so a fresh configuration
/// needs no special casing.
pub fn make_valid_api(requested: Option<cpal::HostId>) -> cpal::HostId {
    let default = cpal::default_host().id();
    match requested {
        Some(api) if cpal::available_hosts().contains(&api) => api,
        Some(api) => {
            log::warn!("Audio API {} unavailable, using {}", api.name(), default.name());
            default
        }
        None => default,
    }
}
