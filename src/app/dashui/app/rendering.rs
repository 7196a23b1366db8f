//! UI rendering for the top menu, status bar, central panel and windows

use super::PlaygroundApp;
use crate::app::dashui::menu::{self, MenuAction};
use crate::app::dashui::new_experiment_window::ExperimentRequest;
use crate::app::dashui::playground::PlaygroundAction;
use crate::app::dashui::settings_window::SettingsResult;
use crate::app::notifications::details_window::NotificationDetailsWindow;
use eframe::egui;
use egui::RichText;
use tracing::info;

impl PlaygroundApp {
    /// Render the top menu bar
    pub(super) fn render_top_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                let action = menu::build_menu(ui, &mut self.theme, self.playground.panel_count());

                match action {
                    MenuAction::ThemeChanged => {
                        info!("Theme changed to {}", self.theme);
                    }
                    MenuAction::AddPanel => {
                        self.playground.add_panel();
                    }
                    MenuAction::RunAll => {
                        let started = self
                            .playground
                            .run_all(&self.config, &mut self.notification_manager);
                        info!("Run all started {} submissions", started);
                    }
                    MenuAction::ResetPlayground => self.playground.reset(),
                    MenuAction::BrowsePrompts => self.prompts_window.open_with(&self.config),
                    MenuAction::NewExperiment => self.open_new_experiment(),
                    MenuAction::OpenSettings => self.settings_window.open_with(&self.config),
                    MenuAction::Quit => {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        info!("Quit requested from menu");
                    }
                    MenuAction::None => {}
                }
            });
        });
    }

    /// Render the bottom status bar
    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let target = if self.config.is_complete() {
                    format!(
                        "{} · {}/{}",
                        self.config.endpoint, self.config.provider, self.config.model
                    )
                } else {
                    "Not configured".to_string()
                };
                ui.label(RichText::new(target).small().weak());

                let pending = self
                    .playground
                    .panels()
                    .iter()
                    .filter(|p| p.is_pending())
                    .count();
                if pending > 0 {
                    ui.separator();
                    ui.spinner();
                    ui.label(RichText::new(format!("{} running", pending)).small());
                }

                self.notification_manager.render_status_bar_indicator(ui);
            });
        });
    }

    /// Render the playground in the central panel
    pub(super) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let action = self
                .playground
                .show(ui, &self.config, &mut self.notification_manager);
            if action == Some(PlaygroundAction::OpenSettings) {
                self.settings_window.open_with(&self.config);
            }
        });
    }

    /// Tell the user what the experiment form produced. Nothing is sent to the
    /// backend, so the toast only confirms the configuration.
    pub fn report_experiment(&mut self, request: &ExperimentRequest) {
        let prompt = request.prompt.as_deref().unwrap_or("no prompt");
        info!("Experiment '{}' configured", request.experiment_name);
        self.notification_manager.notify_info(
            "New Experiment",
            "Dataset run configured",
            format!(
                "Run '{}' for {} on {}",
                request.experiment_name,
                prompt,
                request.dataset.as_deref().unwrap_or("no dataset")
            ),
        );
    }

    /// Render floating windows and notifications
    pub(super) fn render_windows(&mut self, ctx: &egui::Context) {
        if let Some(request) = self.new_experiment_window.show(ctx, &self.config) {
            self.report_experiment(&request);
        }

        if let Some(seed) = self.prompts_window.show(ctx, &self.config) {
            info!(
                "Opening prompt {:?} v{:?} in a new panel",
                seed.prompt_name, seed.prompt_version
            );
            self.playground.add_panel_with(Some(seed));
        }

        match self.settings_window.show(ctx) {
            Some(SettingsResult::Saved(config)) => self.save_config(config),
            Some(SettingsResult::Cancelled) | None => {}
        }

        NotificationDetailsWindow::show(&mut self.notification_manager, ctx);
        self.notification_manager.render_toasts(ctx);
    }
}
