//! Prompt browser: lists the project's prompts with their latest version and
//! opens one in a new playground panel.

use super::playground_panel::PanelSeed;
use crate::app::api_client::{ClientError, PromptSummary, PromptsClient};
use crate::app::config::PlaygroundConfig;
use egui::{Context, RichText};
use std::thread::JoinHandle;
use tracing::{error, info};

type PromptsLoad = JoinHandle<Result<Vec<PromptSummary>, ClientError>>;

#[derive(Default)]
pub struct PromptsWindow {
    pub open: bool,
    pub prompts: Vec<PromptSummary>,
    pub filter: String,
    load: Option<PromptsLoad>,
    load_error: Option<String>,
}

impl PromptsWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_with(&mut self, config: &PlaygroundConfig) {
        self.open = true;
        self.refresh(config);
    }

    pub fn refresh(&mut self, config: &PlaygroundConfig) {
        if self.load.is_some() {
            return;
        }
        self.load_error = None;
        let client = PromptsClient::new(config.clone());
        self.load = Some(std::thread::spawn(move || client.fetch_prompts()));
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_some()
    }

    /// Prompts whose name or tags contain the filter text, case-insensitive
    pub fn visible_prompts(&self) -> Vec<&PromptSummary> {
        let needle = self.filter.trim().to_lowercase();
        self.prompts
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn apply_result(&mut self, result: Result<Vec<PromptSummary>, ClientError>) {
        match result {
            Ok(prompts) => {
                info!("Loaded {} prompts", prompts.len());
                self.prompts = prompts;
            }
            Err(e) => {
                error!("Failed to fetch prompts: {}", e);
                self.load_error = Some(e.to_string());
            }
        }
    }

    fn poll(&mut self) {
        if !self.load.as_ref().is_some_and(|t| t.is_finished()) {
            return;
        }
        if let Some(task) = self.load.take() {
            match task.join() {
                Ok(result) => self.apply_result(result),
                Err(_) => {
                    error!("Prompt loader thread panicked");
                    self.load_error = Some("Loading failed".to_string());
                }
            }
        }
    }

    /// Draw the window. Returns a seed when the user opens a prompt.
    pub fn show(&mut self, ctx: &Context, config: &PlaygroundConfig) -> Option<PanelSeed> {
        if !self.open {
            return None;
        }
        self.poll();
        if self.is_loading() {
            ctx.request_repaint();
        }

        let mut open = self.open;
        let mut opened = None;
        let mut refresh = false;

        egui::Window::new("Prompts")
            .open(&mut open)
            .default_width(560.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.filter)
                            .hint_text("Filter by name or tag"),
                    );
                    let refresh_button = egui::Button::new("⟳ Refresh");
                    if ui.add_enabled(!self.is_loading(), refresh_button).clicked() {
                        refresh = true;
                    }
                    if self.is_loading() {
                        ui.spinner();
                    }
                });

                if let Some(err) = &self.load_error {
                    ui.colored_label(egui::Color32::from_rgb(220, 50, 50), err);
                }
                ui.separator();

                egui::ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
                    egui::Grid::new("prompts_grid")
                        .num_columns(5)
                        .striped(true)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            ui.label(RichText::new("Name").strong());
                            ui.label(RichText::new("Version").strong());
                            ui.label(RichText::new("Type").strong());
                            ui.label(RichText::new("Updated").strong());
                            ui.label("");
                            ui.end_row();

                            for prompt in self.visible_prompts() {
                                ui.label(&prompt.name);
                                ui.label(prompt.versions.to_string());
                                ui.label(&prompt.prompt_type);
                                ui.label(RichText::new(&prompt.latest_version_created_at).weak());
                                if ui.small_button("Open").clicked() {
                                    opened = Some(PanelSeed {
                                        prompt_name: Some(prompt.name.clone()),
                                        prompt_version: Some(prompt.versions),
                                        messages: Vec::new(),
                                    });
                                }
                                ui.end_row();
                            }
                        });
                });
            });

        if refresh {
            self.refresh(config);
        }
        self.open = open;
        opened
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, tags: &[&str]) -> PromptSummary {
        PromptSummary {
            id: name.to_string(),
            name: name.to_string(),
            versions: 1,
            prompt_type: "chat".to_string(),
            observations: 0,
            latest_version_created_at: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn visible_names(window: &PromptsWindow) -> Vec<&str> {
        window
            .visible_prompts()
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    #[test]
    fn test_filter_matches_name_and_tags() {
        let mut window = PromptsWindow::new();
        window.apply_result(Ok(vec![
            summary("Summarize", &[]),
            summary("translate", &["prod"]),
        ]));

        window.filter = "summ".to_string();
        let names = visible_names(&window);
        assert_eq!(names, vec!["Summarize"]);

        window.filter = "PROD".to_string();
        let names = visible_names(&window);
        assert_eq!(names, vec!["translate"]);

        window.filter.clear();
        assert_eq!(window.visible_prompts().len(), 2);
    }

    #[test]
    fn test_failed_load_keeps_previous_list() {
        let mut window = PromptsWindow::new();
        window.apply_result(Ok(vec![summary("a", &[])]));
        window.apply_result(Err(ClientError::Http("connection refused".to_string())));
        assert_eq!(window.prompts.len(), 1);
        assert_eq!(
            window.load_error.as_deref(),
            Some("Request failed: connection refused")
        );
    }
}
