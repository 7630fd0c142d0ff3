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

//! UI module
//!
//! This module provides the settings UI with egui: menu bar, video and
//! save-slot panels, status bar, and dialogs.

pub mod panels;

use crate::core::config::VideoSettings;
use crate::core::layer::VideoLayer;
use crate::core::slots::SlotStore;
use crate::frontend::frame_timer::FrameTimer;

use panels::slots_panel::SlotEditor;

/// UI state management
///
/// Manages visibility and state for all settings UI panels.
pub struct UiState {
    /// Show video settings panel
    pub show_video_panel: bool,
    /// Show save-slot panel
    pub show_slots_panel: bool,
    /// Show about dialog
    pub show_about: bool,
    /// Show key bindings dialog
    pub show_key_bindings: bool,
    /// In-progress slot management edits
    pub slot_editor: SlotEditor,
}

impl UiState {
    /// Create a new UiState with default values
    pub fn new() -> Self {
        Self {
            show_video_panel: true,
            show_slots_panel: false,
            show_about: false,
            show_key_bindings: false,
            slot_editor: SlotEditor::default(),
        }
    }

    /// Render the complete UI
    ///
    /// This renders the menu bar, status bar, and all enabled panels.
    /// Settings edits land directly in `settings` and `touch_enabled`;
    /// the returned action tells the application what else to do.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        settings: &mut VideoSettings,
        touch_enabled: &mut bool,
        slots: &mut dyn SlotStore,
        layer: &VideoLayer,
        frame_timer: &FrameTimer,
        paused: bool,
    ) -> UiAction {
        let mut action = UiAction::None;

        // Render menu bar
        action = action.merge(panels::menu_bar::render_menu_bar(ctx, self, paused));

        // Render status bar
        panels::status_bar::render_status_bar(ctx, layer, slots, frame_timer, paused);

        // Render video settings panel if enabled
        if self.show_video_panel
            && panels::video_panel::render_video_panel(ctx, settings, touch_enabled)
        {
            action = action.merge(UiAction::ApplySettings);
        }

        // Render save-slot panel if enabled
        if self.show_slots_panel {
            panels::slots_panel::render_slots_panel(ctx, &mut self.slot_editor, slots);
        }

        // Render about dialog if enabled
        if self.show_about {
            self.render_about_dialog(ctx);
        }

        // Render key bindings dialog if enabled
        if self.show_key_bindings {
            self.render_key_bindings_dialog(ctx);
        }

        // Transparent central panel to show the video layer
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |_ui| {
                // Empty - the video layer is drawn behind egui
            });

        action
    }

    /// Render the about dialog
    fn render_about_dialog(&mut self, ctx: &egui::Context) {
        egui::Window::new("About Retroframe")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Retroframe - Retro Video Front-End");
                ui.separator();
                ui.label("Version 0.1.0");
                ui.label("Copyright 2025 itsakeyfut");
                ui.separator();
                ui.label("A display front-end for retro content written in Rust,");
                ui.label("with integer scaling, shader effects, and overlays.");
                ui.separator();
                ui.label("Licensed under the Apache License, Version 2.0");
                ui.separator();
                if ui.button("Close").clicked() {
                    self.show_about = false;
                }
            });
    }

    /// Render the key bindings dialog
    fn render_key_bindings_dialog(&mut self, ctx: &egui::Context) {
        egui::Window::new("Key Bindings")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Demo Controls");
                ui.separator();

                ui.label("Space:  Pause/Resume");
                ui.label("F5:     Reset Video");
                ui.label("F10:    Step Frame (when paused)");
                ui.label("F11:    Toggle Fullscreen");

                ui.separator();
                ui.heading("Panels");
                ui.label("Use the View menu to toggle the settings panels");

                ui.separator();
                if ui.button("Close").clicked() {
                    self.show_key_bindings = false;
                }
            });
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions that can be triggered from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// No action
    None,
    /// Toggle pause/resume
    TogglePause,
    /// Step one frame
    StepFrame,
    /// Reset the video layer
    ResetVideo,
    /// Toggle fullscreen
    ToggleFullscreen,
    /// Push edited settings into the video layer and persist them
    ApplySettings,
    /// Load settings from a user-picked file
    ImportSettings,
    /// Save settings to a user-picked file
    ExportSettings,
    /// Exit the application
    Exit,
}

impl UiAction {
    /// Merge two actions, preferring non-None actions
    pub fn merge(self, other: UiAction) -> UiAction {
        match (self, other) {
            (UiAction::None, action) => action,
            (action, UiAction::None) => action,
            (action, _) => action, // First action takes precedence
        }
    }
}
