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

//! Video settings panel
//!
//! Edits every user-facing video option: zoom, aspect ratio, shader
//! effect, overlay, filtering, and brightness.

use crate::core::config::{
    AspectRatio, EffectKind, OverlayKind, VideoSettings, ZoomMode, MAX_ZOOM_PERCENT,
    MIN_ZOOM_PERCENT,
};

/// Aspect ratios offered in the picker
const ASPECT_CHOICES: [AspectRatio; 5] = [
    AspectRatio::FILL,
    AspectRatio::SQUARE,
    AspectRatio::STANDARD,
    AspectRatio::CONSOLE,
    AspectRatio::WIDESCREEN,
];

/// Render the video settings panel
///
/// Edits land directly in `settings` and `touch_enabled`. Returns true
/// when the user changed anything this frame, so the caller can push the
/// new settings into the video layer and persist them.
pub fn render_video_panel(
    ctx: &egui::Context,
    settings: &mut VideoSettings,
    touch_enabled: &mut bool,
) -> bool {
    let before = settings.clone();
    let touch_before = *touch_enabled;

    egui::SidePanel::left("video_panel")
        .resizable(true)
        .default_width(250.0)
        .show(ctx, |ui| {
            ui.heading("Video");
            ui.separator();

            // Zoom mode, with a percent slider for the free-scaling mode
            egui::ComboBox::from_label("Zoom")
                .selected_text(settings.zoom.to_string())
                .show_ui(ui, |ui| {
                    let percent = settings.zoom.percent_value().unwrap_or(100);
                    ui.selectable_value(
                        &mut settings.zoom,
                        ZoomMode::Percent(percent),
                        ZoomMode::Percent(percent).to_string(),
                    );
                    ui.selectable_value(
                        &mut settings.zoom,
                        ZoomMode::IntegerOnly,
                        ZoomMode::IntegerOnly.to_string(),
                    );
                    ui.selectable_value(
                        &mut settings.zoom,
                        ZoomMode::IntegerOnlyY,
                        ZoomMode::IntegerOnlyY.to_string(),
                    );
                });

            if let ZoomMode::Percent(percent) = &mut settings.zoom {
                ui.add(
                    egui::Slider::new(percent, MIN_ZOOM_PERCENT..=MAX_ZOOM_PERCENT).suffix("%"),
                );
            }

            // Aspect ratio
            egui::ComboBox::from_label("Aspect ratio")
                .selected_text(settings.aspect.to_string())
                .show_ui(ui, |ui| {
                    for aspect in ASPECT_CHOICES {
                        ui.selectable_value(&mut settings.aspect, aspect, aspect.to_string());
                    }
                });

            ui.separator();
            ui.heading("Effects");

            // Shader effect
            egui::ComboBox::from_label("Effect")
                .selected_text(settings.effect.to_string())
                .show_ui(ui, |ui| {
                    for effect in [EffectKind::Direct, EffectKind::Scale2x, EffectKind::Prescale2x]
                    {
                        ui.selectable_value(&mut settings.effect, effect, effect.to_string());
                    }
                });

            // Render-target bit depth only matters with an effect active
            ui.add_enabled_ui(!settings.effect.is_direct(), |ui| {
                egui::ComboBox::from_label("Bit depth")
                    .selected_text(format!("{}-bit", settings.effect_bit_depth))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut settings.effect_bit_depth, 16, "16-bit");
                        ui.selectable_value(&mut settings.effect_bit_depth, 24, "24-bit");
                    });
            });

            // Overlay
            egui::ComboBox::from_label("Overlay")
                .selected_text(settings.overlay.to_string())
                .show_ui(ui, |ui| {
                    for overlay in [
                        OverlayKind::Off,
                        OverlayKind::Scanlines,
                        OverlayKind::Scanlines2x,
                        OverlayKind::CrtMask,
                    ] {
                        ui.selectable_value(&mut settings.overlay, overlay, overlay.to_string());
                    }
                });

            ui.add_enabled(
                !settings.overlay.is_off(),
                egui::Slider::new(&mut settings.overlay_intensity, 0.0..=1.0).text("Intensity"),
            );

            ui.separator();
            ui.heading("Output");

            ui.checkbox(&mut settings.linear_filter, "Linear filtering");
            ui.add(egui::Slider::new(&mut settings.brightness, 0.0..=1.0).text("Brightness"));

            ui.separator();
            ui.heading("Input");

            ui.checkbox(touch_enabled, "Touch controls");
        });

    *settings != before || *touch_enabled != touch_before
}
