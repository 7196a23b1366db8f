//! A single playground panel: chat editor, attachments, output and submit.

use super::chat_box::ChatBox;
use crate::app::api_client::{ClientError, CompletionClient};
use crate::app::chat::{ChatCompletionRequest, MessageStore, Role, SubmissionError};
use crate::app::config::PlaygroundConfig;
use crate::app::notifications::NotificationManager;
use egui::{Color32, RichText, ScrollArea, Ui};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::thread::JoinHandle;
use tracing::{debug, error, info, warn};

const NOTIFICATION_SOURCE: &str = "Playground";

type CompletionTask = JoinHandle<Result<Value, ClientError>>;

/// Tool definition that can be attached to a panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl ToolDefinition {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// JSON schema used for structured output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl SchemaDefinition {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

pub fn builtin_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "tool-search-web",
            "search_web",
            "Search the web for information.",
        ),
        ToolDefinition::new(
            "tool-current-time",
            "get_current_time",
            "Return the current date and time.",
        ),
    ]
}

pub fn builtin_schemas() -> Vec<SchemaDefinition> {
    vec![SchemaDefinition::new(
        "schema-answer",
        "answer_with_sources",
        "An answer string plus a list of source URLs.",
    )]
}

/// Initial contents for a panel opened from a saved prompt
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelSeed {
    pub prompt_name: Option<String>,
    pub prompt_version: Option<u32>,
    pub messages: Vec<(Role, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSection {
    Tools,
    Schema,
}

/// What the panel asks its owner to do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Copy,
    Remove,
    OpenSettings,
}

pub struct PlaygroundPanel {
    pub id: u64,
    pub loaded_prompt: Option<(String, u32)>,
    pub store: MessageStore,
    pub output: Option<Value>,
    pub attached_tools: Vec<ToolDefinition>,
    pub attached_schema: Option<SchemaDefinition>,
    pub active_section: Option<PanelSection>,
    chat_box: ChatBox,
    pending: Option<CompletionTask>,
}

impl PlaygroundPanel {
    pub fn new(id: u64, seed: Option<PanelSeed>) -> Self {
        let seed = seed.unwrap_or_default();
        let loaded_prompt = match (seed.prompt_name, seed.prompt_version) {
            (Some(name), Some(version)) => Some((name, version)),
            _ => None,
        };
        Self {
            id,
            loaded_prompt,
            store: MessageStore::from_drafts(seed.messages),
            output: None,
            attached_tools: Vec::new(),
            attached_schema: None,
            active_section: None,
            chat_box: ChatBox::new(("panel", id)),
            pending: None,
        }
    }

    pub fn title(&self) -> String {
        match &self.loaded_prompt {
            Some((name, version)) => format!("{} (v{})", name, version),
            None => "Model".to_string(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn toggle_section(&mut self, section: PanelSection) {
        self.active_section = if self.active_section == Some(section) {
            None
        } else {
            Some(section)
        };
    }

    /// Attach a tool unless one with the same id is already attached
    pub fn attach_tool(&mut self, tool: ToolDefinition) {
        if !self.attached_tools.iter().any(|t| t.id == tool.id) {
            self.attached_tools.push(tool);
        }
    }

    pub fn detach_tool(&mut self, tool_id: &str) {
        self.attached_tools.retain(|t| t.id != tool_id);
    }

    pub fn attach_schema(&mut self, schema: SchemaDefinition) {
        self.attached_schema = Some(schema);
    }

    pub fn detach_schema(&mut self, schema_id: &str) {
        if self.attached_schema.as_ref().map(|s| s.id.as_str()) == Some(schema_id) {
            self.attached_schema = None;
        }
    }

    /// Build the request body for the current messages
    pub fn build_request(
        &self,
        config: &PlaygroundConfig,
    ) -> Result<ChatCompletionRequest, SubmissionError> {
        if let Some(field) = config.missing_field() {
            return Err(SubmissionError::MissingConfiguration(field));
        }
        let request = ChatCompletionRequest::build(self.store.messages(), config);
        request.validate()?;
        Ok(request)
    }

    /// Start a submission on a worker thread. Returns `false` if nothing was
    /// sent, either because one is already running or the request is invalid.
    pub fn submit(
        &mut self,
        config: &PlaygroundConfig,
        notifications: &mut NotificationManager,
    ) -> bool {
        if self.pending.is_some() {
            debug!("Panel {} already has a submission in flight", self.id);
            return false;
        }

        let request = match self.build_request(config) {
            Ok(request) => request,
            Err(e) => {
                warn!("Panel {} submission rejected: {}", self.id, e);
                match e {
                    SubmissionError::EmptyConversation => {
                        notifications.notify_warning(
                            NOTIFICATION_SOURCE,
                            "Nothing to send",
                            e.to_string(),
                        )
                    }
                    SubmissionError::MissingConfiguration(_) => {
                        notifications.notify_error(
                            NOTIFICATION_SOURCE,
                            "Configuration incomplete",
                            e.to_string(),
                        )
                    }
                }
                return false;
            }
        };

        match serde_json::to_string(&request) {
            Ok(body) => info!("[playground/chat] sent: {}", body),
            Err(e) => warn!("Could not serialize request for logging: {}", e),
        }

        let client = CompletionClient::new(config.clone());
        self.pending = Some(std::thread::spawn(move || client.send(&request)));
        true
    }

    /// Collect a finished submission. Returns `true` when one completed.
    pub fn poll(&mut self, notifications: &mut NotificationManager) -> bool {
        let finished = self.pending.as_ref().is_some_and(|task| task.is_finished());
        if !finished {
            return false;
        }
        let Some(task) = self.pending.take() else {
            return false;
        };

        match task.join() {
            Ok(Ok(value)) => {
                info!("[playground/chat] received: {}", value);
                self.output = Some(value);
            }
            Ok(Err(e)) => {
                error!("Panel {} chat failed: {}", self.id, e);
                notifications.notify_error_with_details(
                    NOTIFICATION_SOURCE,
                    "Chat failed",
                    e.to_string(),
                    format!("{:#?}", e),
                );
            }
            Err(_) => {
                error!("Panel {} completion worker panicked", self.id);
                notifications.notify_error(
                    NOTIFICATION_SOURCE,
                    "Chat failed",
                    "The request worker stopped unexpectedly. Check the log for details.",
                );
            }
        }
        true
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        config: &PlaygroundConfig,
        show_remove_button: bool,
        notifications: &mut NotificationManager,
    ) -> Option<PanelAction> {
        let mut action = None;

        ui.group(|ui| {
            ui.set_min_width(380.0);

            ui.horizontal(|ui| {
                ui.strong(self.title());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if show_remove_button
                        && ui
                            .small_button("✕")
                            .on_hover_text("Remove panel")
                            .clicked()
                    {
                        action = Some(PanelAction::Remove);
                    }
                    if ui.small_button("⧉").on_hover_text("Copy panel").clicked() {
                        action = Some(PanelAction::Copy);
                    }
                });
            });

            if let Some(field) = config.missing_field() {
                ui.horizontal(|ui| {
                    ui.colored_label(
                        Color32::from_rgb(255, 150, 0),
                        format!("No LLM connection configured ({} missing).", field),
                    );
                    if ui.small_button("Settings").clicked() {
                        action = Some(PanelAction::OpenSettings);
                    }
                });
            }

            ui.separator();
            self.show_attachment_controls(ui);
            ui.separator();

            ScrollArea::vertical()
                .id_salt(("panel_messages", self.id))
                .max_height(360.0)
                .show(ui, |ui| {
                    self.chat_box.show(ui, &mut self.store);
                });

            ui.separator();
            ui.label(RichText::new("Output").strong());
            ScrollArea::vertical()
                .id_salt(("panel_output", self.id))
                .max_height(200.0)
                .show(ui, |ui| {
                    let text = self
                        .output
                        .as_ref()
                        .map(|v| serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()))
                        .unwrap_or_default();
                    ui.add(egui::Label::new(RichText::new(text).monospace()).wrap());
                });

            ui.separator();
            ui.horizontal(|ui| {
                let pending = self.is_pending();
                if ui.add_enabled(!pending, egui::Button::new("Submit")).clicked() {
                    self.submit(config, notifications);
                }
                if pending {
                    ui.spinner();
                }
            });
        });

        action
    }

    fn show_attachment_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let tools_label = format!("Tools ({})", self.attached_tools.len());
            if ui
                .selectable_label(self.active_section == Some(PanelSection::Tools), tools_label)
                .clicked()
            {
                self.toggle_section(PanelSection::Tools);
            }
            let schema_label = format!("Schema ({})", usize::from(self.attached_schema.is_some()));
            if ui
                .selectable_label(self.active_section == Some(PanelSection::Schema), schema_label)
                .clicked()
            {
                self.toggle_section(PanelSection::Schema);
            }
        });

        match self.active_section {
            Some(PanelSection::Tools) => {
                ui.label(RichText::new("Configure tools for your model to use.").weak());
                let mut detach = None;
                for tool in &self.attached_tools {
                    ui.horizontal(|ui| {
                        ui.label(&tool.name);
                        if ui.small_button("✕").clicked() {
                            detach = Some(tool.id.clone());
                        }
                    });
                }
                if let Some(id) = detach {
                    self.detach_tool(&id);
                }
                for tool in builtin_tools() {
                    let attached = self.attached_tools.iter().any(|t| t.id == tool.id);
                    let response = ui
                        .add_enabled(!attached, egui::Button::new(format!("+ {}", tool.name)))
                        .on_hover_text(&tool.description);
                    if response.clicked() {
                        self.attach_tool(tool);
                    }
                }
            }
            Some(PanelSection::Schema) => {
                ui.label(RichText::new("Configure JSON schema for structured output.").weak());
                if let Some(schema) = self.attached_schema.clone() {
                    ui.horizontal(|ui| {
                        ui.label(&schema.name);
                        if ui.small_button("✕").clicked() {
                            self.detach_schema(&schema.id);
                        }
                    });
                }
                for schema in builtin_schemas() {
                    if ui
                        .button(format!("Use {}", schema.name))
                        .on_hover_text(&schema.description)
                        .clicked()
                    {
                        self.attach_schema(schema);
                    }
                }
            }
            None => {}
        }
    }
}
