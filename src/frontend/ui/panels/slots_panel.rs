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

//! Save-slot panel
//!
//! Selects the active save slot and manages the named extra slots:
//! create, rename, and delete with confirmation.

use crate::core::error::FrontendError;
use crate::core::slots::{SlotStore, NO_SAVE_SLOT};

/// In-progress slot management edits
///
/// Lives across frames so text inputs and the delete confirmation
/// survive until the user finishes or cancels them.
#[derive(Debug, Default)]
pub struct SlotEditor {
    /// Name being typed for a new slot
    pub new_name: String,
    /// Slot being renamed, when a rename is in progress
    pub rename_from: Option<String>,
    /// Replacement name being typed for the rename
    pub rename_to: String,
    /// Slot awaiting delete confirmation
    pub confirm_delete: Option<String>,
    /// Last management error, cleared by the next action
    pub error: Option<String>,
}

/// Label shown for a slot name
///
/// The main slot and the no-save sentinel get fixed labels; named slots
/// are shown as-is.
pub fn display_label(name: &str) -> &str {
    if name.is_empty() {
        "Main"
    } else if name == NO_SAVE_SLOT {
        "No Save"
    } else {
        name
    }
}

/// Map a slot management failure to the message shown in the panel
fn friendly(err: &FrontendError) -> String {
    match err {
        FrontendError::SlotExists(_) => {
            String::from("A save slot with that name already exists")
        }
        FrontendError::SlotActive(_) => {
            String::from("Can't delete the currently active save slot")
        }
        _ => err.to_string(),
    }
}

/// Select a slot, surfacing any failure in the panel
fn select(editor: &mut SlotEditor, slots: &mut dyn SlotStore, name: &str) {
    editor.error = None;
    if let Err(e) = slots.set_current(name) {
        editor.error = Some(friendly(&e));
    }
}

/// Render the save-slot panel
///
/// Shows the main slot, every named extra slot, and the no-save
/// sentinel, with the active one highlighted. Management flows for the
/// extra slots run below the list.
pub fn render_slots_panel(ctx: &egui::Context, editor: &mut SlotEditor, slots: &mut dyn SlotStore) {
    egui::Window::new("Save Slots")
        .default_width(300.0)
        .resizable(true)
        .show(ctx, |ui| {
            let current = slots.current().to_string();
            let names = slots.slots();

            egui::Grid::new("slot_list")
                .striped(true)
                .num_columns(3)
                .show(ui, |ui| {
                    // Main slot
                    if ui
                        .selectable_label(current.is_empty(), display_label(""))
                        .clicked()
                    {
                        select(editor, slots, "");
                    }
                    ui.label(slots.describe(""));
                    ui.label("");
                    ui.end_row();

                    // Named extra slots
                    for name in &names {
                        if ui
                            .selectable_label(current == *name, display_label(name))
                            .clicked()
                        {
                            select(editor, slots, name);
                        }
                        ui.label(slots.describe(name));
                        ui.horizontal(|ui| {
                            if ui.small_button("Rename").clicked() {
                                editor.error = None;
                                editor.rename_from = Some(name.clone());
                                editor.rename_to = name.clone();
                            }
                            if ui.small_button("Delete").clicked() {
                                editor.error = None;
                                editor.confirm_delete = Some(name.clone());
                            }
                        });
                        ui.end_row();
                    }

                    // No-save sentinel
                    if ui
                        .selectable_label(current == NO_SAVE_SLOT, display_label(NO_SAVE_SLOT))
                        .clicked()
                    {
                        select(editor, slots, NO_SAVE_SLOT);
                    }
                    ui.label("Saving disabled");
                    ui.label("");
                    ui.end_row();
                });

            if names.is_empty() {
                ui.label("No extra save slots exist");
            }

            ui.separator();

            // Create flow
            ui.horizontal(|ui| {
                ui.label("New slot:");
                ui.text_edit_singleline(&mut editor.new_name);
                if ui.button("Create").clicked() {
                    editor.error = None;
                    match slots.create(editor.new_name.trim()) {
                        Ok(()) => editor.new_name.clear(),
                        Err(e) => editor.error = Some(friendly(&e)),
                    }
                }
            });

            // Rename flow
            if let Some(from) = editor.rename_from.clone() {
                ui.separator();
                ui.label(format!("Rename {}:", display_label(&from)));
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut editor.rename_to);
                    if ui.button("Apply").clicked() {
                        editor.error = None;
                        match slots.rename(&from, editor.rename_to.trim()) {
                            Ok(()) => editor.rename_from = None,
                            Err(e) => editor.error = Some(friendly(&e)),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        editor.rename_from = None;
                    }
                });
            }

            // Delete confirmation
            if let Some(name) = editor.confirm_delete.clone() {
                ui.separator();
                ui.label("Really delete this save slot?");
                ui.horizontal(|ui| {
                    ui.strong(display_label(&name));
                    if ui.button("Delete").clicked() {
                        editor.confirm_delete = None;
                        editor.error = None;
                        if let Err(e) = slots.delete(&name) {
                            editor.error = Some(friendly(&e));
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        editor.confirm_delete = None;
                    }
                });
            }

            // Error from the last management action
            if let Some(msg) = &editor.error {
                ui.separator();
                ui.colored_label(egui::Color32::RED, msg);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label_names() {
        assert_eq!(display_label(""), "Main");
        assert_eq!(display_label(NO_SAVE_SLOT), "No Save");
        assert_eq!(display_label("slot-a"), "slot-a");
    }

    #[test]
    fn test_friendly_messages() {
        assert_eq!(
            friendly(&FrontendError::SlotExists("a".into())),
            "A save slot with that name already exists"
        );
        assert_eq!(
            friendly(&FrontendError::SlotActive("a".into())),
            "Can't delete the currently active save slot"
        );
        assert_eq!(
            friendly(&FrontendError::SlotMissing("a".into())),
            "No such slot: \"a\""
        );
    }
}
