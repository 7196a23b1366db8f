//! "New Dataset Run" window: configure running a prompt version against a
//! dataset.
//!
//! Prompt names, prompt versions and LLM connections are fetched on worker
//! threads when the window opens; the selection rules below run on the UI
//! thread once results arrive.

use crate::app::api_client::{ClientError, LlmConnection, PromptsClient};
use crate::app::config::PlaygroundConfig;
use egui::{Context, RichText, Ui};
use serde::{Deserialize, Serialize};
use std::thread::JoinHandle;
use tracing::{debug, error, info};

pub const DATASETS: [&str; 2] = ["dataset-1", "dataset-2"];

type InitialLoad = JoinHandle<(Vec<String>, Result<Vec<LlmConnection>, ClientError>)>;

/// Sampling parameters for the experiment run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
            top_p: 1.0,
        }
    }
}

/// Everything the form collected, handed to the caller on submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRequest {
    pub experiment_name: String,
    pub description: String,
    pub prompt: Option<String>,
    pub version: Option<u32>,
    pub provider_id: Option<String>,
    pub model: Option<String>,
    pub dataset: Option<String>,
    pub model_parameters: ModelSettings,
}

#[derive(Default)]
pub struct NewExperimentWindow {
    pub open: bool,
    pub experiment_name: String,
    pub description: String,
    pub all_prompts: Vec<String>,
    pub available_versions: Vec<u32>,
    pub selected_prompt: Option<String>,
    pub selected_version: Option<u32>,
    pub providers: Vec<LlmConnection>,
    pub selected_provider: Option<String>,
    pub selected_model: Option<String>,
    pub selected_dataset: Option<String>,
    pub model_settings: ModelSettings,
    pub show_advanced_settings: bool,
    initial_load: Option<InitialLoad>,
    versions_load: Option<(String, JoinHandle<Vec<u32>>)>,
    load_error: Option<String>,
}

impl NewExperimentWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the form preselecting a prompt and version, and start loading
    /// prompt names and connections.
    pub fn open_for(
        &mut self,
        prompt_name: Option<String>,
        prompt_version: Option<u32>,
        config: &PlaygroundConfig,
    ) {
        self.reset_form(prompt_name, prompt_version);
        self.open = true;

        let client = PromptsClient::new(config.clone());
        self.initial_load = Some(std::thread::spawn(move || {
            (client.fetch_all_prompt_names(), client.fetch_llm_connections())
        }));
        self.request_versions(config);
    }

    /// Clear the form fields without touching the network
    pub fn reset_form(&mut self, prompt_name: Option<String>, prompt_version: Option<u32>) {
        self.experiment_name.clear();
        self.description.clear();
        self.selected_prompt = prompt_name;
        self.selected_version = prompt_version;
        self.available_versions.clear();
        self.selected_dataset = None;
        self.load_error = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.show_advanced_settings = false;
    }

    fn request_versions(&mut self, config: &PlaygroundConfig) {
        let Some(prompt) = self.selected_prompt.clone() else {
            return;
        };
        let client = PromptsClient::new(config.clone());
        let name = prompt.clone();
        self.versions_load = Some((
            prompt,
            std::thread::spawn(move || client.fetch_versions_for_prompt(&name)),
        ));
    }

    pub fn select_prompt(&mut self, prompt: String, config: &PlaygroundConfig) {
        if self.selected_prompt.as_deref() == Some(prompt.as_str()) {
            return;
        }
        self.selected_prompt = Some(prompt);
        self.available_versions.clear();
        self.request_versions(config);
    }

    /// Apply prompt names and connections from the initial load.
    /// The first connection is preselected.
    pub fn apply_initial_data(
        &mut self,
        prompt_names: Vec<String>,
        connections: Vec<LlmConnection>,
    ) {
        self.all_prompts = prompt_names;
        self.selected_provider = connections.first().map(|c| c.id.clone());
        self.providers = connections;
        self.sync_model();
    }

    /// Apply the version list of the selected prompt, newest first. A
    /// selected version that does not exist falls back to the newest one.
    pub fn apply_versions(&mut self, mut versions: Vec<u32>) {
        versions.sort_unstable_by(|a, b| b.cmp(a));
        if !self
            .selected_version
            .is_some_and(|v| versions.contains(&v))
        {
            self.selected_version = versions.first().copied();
        }
        self.available_versions = versions;
    }

    pub fn select_provider(&mut self, provider_id: String) {
        self.selected_provider = Some(provider_id);
        self.sync_model();
    }

    pub fn selected_connection(&self) -> Option<&LlmConnection> {
        let id = self.selected_provider.as_deref()?;
        self.providers.iter().find(|c| c.id == id)
    }

    pub fn available_models(&self) -> &[String] {
        self.selected_connection()
            .map(|c| c.custom_models.as_slice())
            .unwrap_or(&[])
    }

    /// Keep the selected model valid for the selected connection
    fn sync_model(&mut self) {
        let replacement = {
            let models = self.available_models();
            let keep = self
                .selected_model
                .as_ref()
                .is_some_and(|m| models.contains(m));
            (!keep).then(|| models.first().cloned())
        };
        if let Some(model) = replacement {
            self.selected_model = model;
        }
    }

    pub fn reset_model_settings(&mut self) {
        self.model_settings = ModelSettings::default();
    }

    pub fn to_request(&self) -> ExperimentRequest {
        ExperimentRequest {
            experiment_name: self.experiment_name.clone(),
            description: self.description.clone(),
            prompt: self.selected_prompt.clone(),
            version: self.selected_version,
            provider_id: self.selected_provider.clone(),
            model: self.selected_model.clone(),
            dataset: self.selected_dataset.clone(),
            model_parameters: self.model_settings,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.initial_load.is_some() || self.versions_load.is_some()
    }

    /// Pick up finished background loads
    pub fn poll(&mut self) {
        if self.initial_load.as_ref().is_some_and(|t| t.is_finished()) {
            if let Some(task) = self.initial_load.take() {
                match task.join() {
                    Ok((names, Ok(connections))) => {
                        debug!(
                            "Loaded {} prompts and {} connections",
                            names.len(),
                            connections.len()
                        );
                        self.apply_initial_data(names, connections);
                    }
                    Ok((names, Err(e))) => {
                        error!("Failed to fetch LLM connections: {}", e);
                        self.load_error = Some(e.to_string());
                        self.apply_initial_data(names, Vec::new());
                    }
                    Err(_) => {
                        error!("Experiment loader thread panicked");
                        self.load_error = Some("Loading failed".to_string());
                    }
                }
            }
        }

        if self
            .versions_load
            .as_ref()
            .is_some_and(|(_, t)| t.is_finished())
        {
            if let Some((prompt, task)) = self.versions_load.take() {
                // Ignore answers for a prompt that is no longer selected
                if self.selected_prompt.as_deref() == Some(prompt.as_str()) {
                    self.apply_versions(task.join().unwrap_or_default());
                }
            }
        }
    }

    /// Draw the window. Returns the request when the user submits.
    pub fn show(&mut self, ctx: &Context, config: &PlaygroundConfig) -> Option<ExperimentRequest> {
        if !self.open {
            return None;
        }
        self.poll();
        if self.is_loading() {
            ctx.request_repaint();
        }

        let mut open = self.open;
        let mut submitted = None;
        let mut cancelled = false;

        egui::Window::new("New Dataset Run")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(460.0)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("Create a dataset run to test a prompt version on a dataset.")
                        .weak(),
                );
                ui.separator();
                self.show_form(ui, config);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                    if ui.button("Create").clicked() {
                        submitted = Some(self.to_request());
                    }
                });
            });

        if submitted.is_some() || cancelled {
            open = false;
        }
        self.open = open;
        if !self.open {
            self.close();
        }
        if let Some(request) = &submitted {
            info!("New experiment requested: {:?}", request);
        }
        submitted
    }

    fn show_form(&mut self, ui: &mut Ui, config: &PlaygroundConfig) {
        if let Some(err) = &self.load_error {
            ui.colored_label(egui::Color32::from_rgb(220, 50, 50), err);
        }

        egui::Grid::new("new_experiment_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Experiment name (optional)");
                ui.text_edit_singleline(&mut self.experiment_name);
                ui.end_row();

                ui.label("Description (optional)");
                ui.add(
                    egui::TextEdit::multiline(&mut self.description)
                        .hint_text("Add description...")
                        .desired_rows(3),
                );
                ui.end_row();

                ui.label("Prompt");
                ui.horizontal(|ui| {
                    let mut chosen = None;
                    egui::ComboBox::from_id_salt("experiment_prompt")
                        .selected_text(self.selected_prompt.clone().unwrap_or_default())
                        .show_ui(ui, |ui| {
                            for name in &self.all_prompts {
                                let selected =
                                    self.selected_prompt.as_deref() == Some(name.as_str());
                                if ui.selectable_label(selected, name).clicked() {
                                    chosen = Some(name.clone());
                                }
                            }
                        });
                    if let Some(name) = chosen {
                        self.select_prompt(name, config);
                    }

                    ui.add_enabled_ui(!self.available_versions.is_empty(), |ui| {
                        egui::ComboBox::from_id_salt("experiment_version")
                            .selected_text(
                                self.selected_version
                                    .map(|v| format!("Version {}", v))
                                    .unwrap_or_default(),
                            )
                            .show_ui(ui, |ui| {
                                for version in &self.available_versions {
                                    ui.selectable_value(
                                        &mut self.selected_version,
                                        Some(*version),
                                        format!("Version {}", version),
                                    );
                                }
                            });
                    });
                });
                ui.end_row();

                ui.label("Provider");
                let mut chosen_provider = None;
                egui::ComboBox::from_id_salt("experiment_provider")
                    .selected_text(
                        self.selected_connection()
                            .map(|c| c.provider.clone())
                            .unwrap_or_else(|| "Select a provider".to_string()),
                    )
                    .show_ui(ui, |ui| {
                        for connection in &self.providers {
                            let selected =
                                self.selected_provider.as_deref() == Some(connection.id.as_str());
                            if ui.selectable_label(selected, &connection.provider).clicked() {
                                chosen_provider = Some(connection.id.clone());
                            }
                        }
                    });
                if let Some(id) = chosen_provider {
                    self.select_provider(id);
                }
                ui.end_row();

                ui.label("Model");
                let models = self.available_models().to_vec();
                ui.add_enabled_ui(!models.is_empty(), |ui| {
                    egui::ComboBox::from_id_salt("experiment_model")
                        .selected_text(self.selected_model.clone().unwrap_or_default())
                        .show_ui(ui, |ui| {
                            for model in models {
                                let label = model.clone();
                                ui.selectable_value(&mut self.selected_model, Some(model), label);
                            }
                        });
                });
                ui.end_row();

                ui.label("Dataset");
                egui::ComboBox::from_id_salt("experiment_dataset")
                    .selected_text(
                        self.selected_dataset
                            .clone()
                            .unwrap_or_else(|| "Select a dataset".to_string()),
                    )
                    .show_ui(ui, |ui| {
                        for dataset in DATASETS {
                            ui.selectable_value(
                                &mut self.selected_dataset,
                                Some(dataset.to_string()),
                                dataset,
                            );
                        }
                    });
                ui.end_row();
            });

        ui.add_space(6.0);
        ui.toggle_value(&mut self.show_advanced_settings, "Model Advanced Settings");
        if self.show_advanced_settings {
            ui.group(|ui| {
                if let Some(connection) = self.selected_connection() {
                    ui.label(RichText::new(format!("Provider: {}", connection.provider)).weak());
                }
                ui.add(
                    egui::Slider::new(&mut self.model_settings.temperature, 0.0..=2.0)
                        .text("Temperature"),
                );
                ui.add(
                    egui::Slider::new(&mut self.model_settings.max_tokens, 1..=8192)
                        .text("Max tokens"),
                );
                ui.add(egui::Slider::new(&mut self.model_settings.top_p, 0.0..=1.0).text("Top P"));
                if ui.button("Reset to defaults").clicked() {
                    self.reset_model_settings();
                }
            });
        }
    }
}
