use crate::app::config::PlaygroundConfig;
use egui::{Context, RichText};

/// Outcome of a frame of the settings window
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsResult {
    Saved(PlaygroundConfig),
    Cancelled,
}

/// Editor for the backend connection settings.
///
/// Edits go to a draft copy; nothing changes until Save is pressed.
#[derive(Default)]
pub struct SettingsWindow {
    pub open: bool,
    pub draft: PlaygroundConfig,
    show_secret: bool,
}

impl SettingsWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_with(&mut self, config: &PlaygroundConfig) {
        self.draft = config.clone();
        self.open = true;
        self.show_secret = false;
    }

    pub fn show(&mut self, ctx: &Context) -> Option<SettingsResult> {
        if !self.open {
            return None;
        }

        let mut open = self.open;
        let mut result = None;

        egui::Window::new("Playground Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Endpoint");
                        ui.text_edit_singleline(&mut self.draft.endpoint);
                        ui.end_row();

                        ui.label("Project ID");
                        ui.text_edit_singleline(&mut self.draft.project_id);
                        ui.end_row();

                        ui.label("Provider");
                        ui.text_edit_singleline(&mut self.draft.provider);
                        ui.end_row();

                        ui.label("Adapter");
                        ui.text_edit_singleline(&mut self.draft.adapter);
                        ui.end_row();

                        ui.label("Model");
                        ui.text_edit_singleline(&mut self.draft.model);
                        ui.end_row();

                        ui.label("Temperature");
                        ui.add(egui::Slider::new(&mut self.draft.temperature, 0.0..=2.0));
                        ui.end_row();

                        ui.label("Public key");
                        let mut public_key = self.draft.public_key.clone().unwrap_or_default();
                        if ui.text_edit_singleline(&mut public_key).changed() {
                            self.draft.public_key = Some(public_key).filter(|k| !k.is_empty());
                        }
                        ui.end_row();

                        ui.label("Secret key");
                        ui.horizontal(|ui| {
                            let mut secret_key = self.draft.secret_key.clone().unwrap_or_default();
                            let edit = ui.add(
                                egui::TextEdit::singleline(&mut secret_key)
                                    .password(!self.show_secret),
                            );
                            if edit.changed() {
                                self.draft.secret_key = Some(secret_key).filter(|k| !k.is_empty());
                            }
                            ui.checkbox(&mut self.show_secret, "Show");
                        });
                        ui.end_row();
                    });

                if let Some(field) = self.draft.missing_field() {
                    ui.label(
                        RichText::new(format!("'{}' is required to submit.", field))
                            .color(egui::Color32::from_rgb(255, 150, 0)),
                    );
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        result = Some(SettingsResult::Saved(self.draft.clone()));
                    }
                    if ui.button("Cancel").clicked() {
                        result = Some(SettingsResult::Cancelled);
                    }
                });
            });

        if result.is_some() {
            open = false;
        }
        self.open = open;
        result
    }
}
