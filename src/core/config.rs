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

//! Video presentation settings
//!
//! [`VideoSettings`] is the immutable snapshot of user-facing video
//! options handed to the layer: zoom mode, aspect ratio, shader effect,
//! overlay, filtering and brightness. The layer never reads a global
//! settings store; the host passes the snapshot into `place()` and
//! drives the remaining state through explicit setters.
//!
//! Settings persist as a TOML document via [`VideoSettings::load`] and
//! [`VideoSettings::save`].

use crate::core::error::{FrontendError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Smallest accepted percentage zoom
pub const MIN_ZOOM_PERCENT: u8 = 10;
/// Largest accepted percentage zoom (values above 100 overscan)
pub const MAX_ZOOM_PERCENT: u8 = 200;

/// How content size maps to the viewport
///
/// `Percent` applies a continuous scale to the aspect-fitted rectangle;
/// the `IntegerOnly*` modes snap one or both axes to exact multiples of
/// the content resolution for pixel-perfect output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoomMode {
    /// Continuous scale relative to the best-fit size (100 = exact fit)
    Percent(u8),
    /// Both axes snapped to integer multiples of the content size
    IntegerOnly,
    /// Height snapped to an integer multiple, width follows the aspect
    /// ratio continuously
    IntegerOnlyY,
}

impl ZoomMode {
    /// Percentage zoom clamped to the accepted range
    pub fn percent(value: u8) -> Self {
        Self::Percent(value.clamp(MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT))
    }

    /// Whether this mode snaps any axis to the pixel grid
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::IntegerOnly | Self::IntegerOnlyY)
    }

    /// The percentage value, if this is a `Percent` mode
    pub fn percent_value(&self) -> Option<u8> {
        match self {
            Self::Percent(v) => Some(*v),
            _ => None,
        }
    }

    fn sanitized(self) -> Self {
        match self {
            Self::Percent(v) => Self::percent(v),
            other => other,
        }
    }
}

impl Default for ZoomMode {
    fn default() -> Self {
        Self::Percent(100)
    }
}

impl fmt::Display for ZoomMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(v) => write!(f, "{}%", v),
            Self::IntegerOnly => write!(f, "Integer-only"),
            Self::IntegerOnlyY => write!(f, "Integer-only (height)"),
        }
    }
}

/// Displayed aspect ratio as a rational number
///
/// A zero denominator means "unconstrained": the content fills the whole
/// viewport instead of being fitted to a fixed ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRatio {
    /// Width component
    pub numer: u32,
    /// Height component (0 = unconstrained)
    pub denom: u32,
}

impl AspectRatio {
    /// Fill the viewport without constraining the ratio
    pub const FILL: AspectRatio = AspectRatio { numer: 0, denom: 0 };
    /// 1:1 square pixels
    pub const SQUARE: AspectRatio = AspectRatio { numer: 1, denom: 1 };
    /// 4:3 standard-definition television
    pub const STANDARD: AspectRatio = AspectRatio { numer: 4, denom: 3 };
    /// 8:7 raw console pixel ratio
    pub const CONSOLE: AspectRatio = AspectRatio { numer: 8, denom: 7 };
    /// 16:9 widescreen
    pub const WIDESCREEN: AspectRatio = AspectRatio { numer: 16, denom: 9 };

    /// Create a constrained ratio
    pub fn new(numer: u32, denom: u32) -> Self {
        Self { numer, denom }
    }

    /// Whether the ratio is unconstrained (fill the viewport)
    pub fn is_unconstrained(&self) -> bool {
        self.denom == 0 || self.numer == 0
    }

    /// The ratio as a float, or `None` when unconstrained
    pub fn ratio(&self) -> Option<f32> {
        if self.is_unconstrained() {
            None
        } else {
            Some(self.numer as f32 / self.denom as f32)
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unconstrained() {
            write!(f, "Fill")
        } else {
            write!(f, "{}:{}", self.numer, self.denom)
        }
    }
}

/// Shader effect applied to content before presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    /// No effect: content texture is drawn directly
    Direct,
    /// Scale2x edge-interpolating upscale
    Scale2x,
    /// Nearest-neighbor 2x prescale before filtering
    Prescale2x,
}

impl EffectKind {
    /// Whether this kind bypasses the offscreen effect pass
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Direct)
    }

    /// Render-target size multiplier relative to content size
    pub fn scale_factor(&self) -> u32 {
        match self {
            Self::Direct => 1,
            Self::Scale2x | Self::Prescale2x => 2,
        }
    }
}

impl Default for EffectKind {
    fn default() -> Self {
        Self::Direct
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "Off"),
            Self::Scale2x => write!(f, "Scale2x"),
            Self::Prescale2x => write!(f, "Prescale 2x"),
        }
    }
}

/// Screen-space overlay blended over the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayKind {
    /// No overlay
    Off,
    /// One dark line per content line
    Scanlines,
    /// One dark line per two content lines
    Scanlines2x,
    /// CRT-style shadow mask grid
    CrtMask,
}

impl OverlayKind {
    /// Whether an overlay texture is needed at all
    pub fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }
}

impl Default for OverlayKind {
    fn default() -> Self {
        Self::Off
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "Off"),
            Self::Scanlines => write!(f, "Scanlines"),
            Self::Scanlines2x => write!(f, "Scanlines 2x"),
            Self::CrtMask => write!(f, "CRT mask"),
        }
    }
}

/// Snapshot of all user-facing video options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    /// Content zoom mode
    pub zoom: ZoomMode,
    /// Displayed aspect ratio
    pub aspect: AspectRatio,
    /// Shader effect kind
    pub effect: EffectKind,
    /// Effect render-target bit depth (16 or 24)
    pub effect_bit_depth: u8,
    /// Overlay kind
    pub overlay: OverlayKind,
    /// Overlay blend intensity (0..=1)
    pub overlay_intensity: f32,
    /// Sample content with linear filtering instead of nearest
    pub linear_filter: bool,
    /// Content brightness multiplier (0..=1, 1 = unmodified)
    pub brightness: f32,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            zoom: ZoomMode::default(),
            aspect: AspectRatio::default(),
            effect: EffectKind::default(),
            effect_bit_depth: 16,
            overlay: OverlayKind::default(),
            overlay_intensity: 0.25,
            linear_filter: true,
            brightness: 1.0,
        }
    }
}

impl VideoSettings {
    /// Load settings from a TOML file
    ///
    /// Missing fields fall back to their defaults; out-of-range values
    /// are clamped rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| FrontendError::io(path, e))?;
        let settings: Self = toml::from_str(&contents)?;
        Ok(settings.sanitized())
    }

    /// Save settings to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|e| FrontendError::io(path, e))?;
        log::info!("Saved video settings to {}", path.display());
        Ok(())
    }

    /// Clamp every field into its accepted range
    pub fn sanitized(mut self) -> Self {
        self.zoom = self.zoom.sanitized();
        self.effect_bit_depth = if self.effect_bit_depth <= 16 { 16 } else { 24 };
        self.overlay_intensity = self.overlay_intensity.clamp(0.0, 1.0);
        self.brightness = self.brightness.clamp(0.0, 1.0);
        self
    }
}
