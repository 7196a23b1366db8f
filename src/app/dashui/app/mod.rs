//! Modular implementation of PlaygroundApp
//!
//! - theme: Theme selection and application
//! - rendering: Top menu bar, status bar, central panel and windows

use super::new_experiment_window::NewExperimentWindow;
use super::playground::Playground;
use super::prompts_window::PromptsWindow;
use super::settings_window::SettingsWindow;
use crate::app::config::PlaygroundConfig;
use crate::app::notifications::NotificationManager;
use eframe::egui;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

mod rendering;
mod theme;

#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeChoice {
    #[default]
    Latte,
    Frappe,
    Macchiato,
    Mocha,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 4] = [
        ThemeChoice::Latte,
        ThemeChoice::Frappe,
        ThemeChoice::Macchiato,
        ThemeChoice::Mocha,
    ];
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeChoice::Latte => write!(f, "Latte"),
            ThemeChoice::Frappe => write!(f, "Frappe"),
            ThemeChoice::Macchiato => write!(f, "Macchiato"),
            ThemeChoice::Mocha => write!(f, "Mocha"),
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct PlaygroundApp {
    pub theme: ThemeChoice,

    #[serde(skip)]
    pub config: PlaygroundConfig,
    #[serde(skip)]
    pub config_path: PathBuf,
    #[serde(skip)]
    pub playground: Playground,
    #[serde(skip)]
    pub new_experiment_window: NewExperimentWindow,
    #[serde(skip)]
    pub prompts_window: PromptsWindow,
    #[serde(skip)]
    pub settings_window: SettingsWindow,
    #[serde(skip)]
    pub notification_manager: NotificationManager,
    #[serde(skip)]
    /// Theme last pushed to the egui context
    applied_theme: Option<ThemeChoice>,
}

impl Default for PlaygroundApp {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::default(),
            config: PlaygroundConfig::default(),
            config_path: PlaygroundConfig::default_path(),
            playground: Playground::default(),
            new_experiment_window: NewExperimentWindow::new(),
            prompts_window: PromptsWindow::new(),
            settings_window: SettingsWindow::new(),
            notification_manager: NotificationManager::new(),
            applied_theme: None,
        }
    }
}

impl PlaygroundApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        let path = PlaygroundConfig::default_path();
        app.load_config(path);
        app.apply_theme(&cc.egui_ctx);
        app
    }

    /// Build an app around an explicit config, without touching disk
    pub fn with_config(config: PlaygroundConfig, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
            ..Self::default()
        }
    }

    /// Load the config file; a broken file falls back to defaults and is
    /// reported as a notification.
    pub fn load_config(&mut self, path: PathBuf) {
        match PlaygroundConfig::load_from_file(&path) {
            Ok(config) => self.config = config,
            Err(e) => {
                error!("Failed to load config: {:#}", e);
                self.config = PlaygroundConfig::default();
                self.notification_manager.notify_error_with_details(
                    "Settings",
                    "Could not load settings",
                    "Using default settings until the file is fixed.",
                    format!("{:#}", e),
                );
            }
        }
        self.config_path = path;
    }

    /// Persist a new config and hand it to every panel
    pub fn save_config(&mut self, config: PlaygroundConfig) {
        match config.save_to_file(&self.config_path) {
            Ok(()) => {
                self.config = config;
                self.notification_manager
                    .notify_success("Settings", "Settings saved", "Playground settings saved.");
            }
            Err(e) => {
                error!("Failed to save config: {:#}", e);
                self.notification_manager.notify_error_with_details(
                    "Settings",
                    "Could not save settings",
                    "Settings were not written to disk.",
                    format!("{:#}", e),
                );
            }
        }
    }

    pub fn open_new_experiment(&mut self) {
        let (prompt, version) = self
            .playground
            .panels()
            .iter()
            .find_map(|p| p.loaded_prompt.clone())
            .map(|(name, version)| (Some(name), Some(version)))
            .unwrap_or((None, None));
        info!("Opening new experiment window (prompt {:?}, version {:?})", prompt, version);
        self.new_experiment_window.open_for(prompt, version, &self.config);
    }
}

impl eframe::App for PlaygroundApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.applied_theme != Some(self.theme) {
            self.apply_theme(ctx);
        }

        if self.playground.poll(&mut self.notification_manager) {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.render_top_menu_bar(ctx);
        self.render_status_bar(ctx);
        self.render_central_panel(ctx);
        self.render_windows(ctx);
    }
}
