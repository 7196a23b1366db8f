//! Theme management

use super::{PlaygroundApp, ThemeChoice};
use eframe::egui;

impl PlaygroundApp {
    /// Apply the selected theme to the UI context
    pub(super) fn apply_theme(&mut self, ctx: &egui::Context) {
        match self.theme {
            ThemeChoice::Latte => catppuccin_egui::set_theme(ctx, catppuccin_egui::LATTE),
            ThemeChoice::Frappe => catppuccin_egui::set_theme(ctx, catppuccin_egui::FRAPPE),
            ThemeChoice::Macchiato => catppuccin_egui::set_theme(ctx, catppuccin_egui::MACCHIATO),
            ThemeChoice::Mocha => catppuccin_egui::set_theme(ctx, catppuccin_egui::MOCHA),
        }

        // Square-ish window corners
        let mut style = (*ctx.style()).clone();
        style.visuals.window_corner_radius = egui::CornerRadius::same(2);
        ctx.set_style(style);

        self.applied_theme = Some(self.theme);
        tracing::debug!("Applied theme {}", self.theme);
    }
}
