use crate::app::dashui::app::ThemeChoice;
use eframe::egui;
use egui::RichText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    ThemeChanged,
    AddPanel,
    RunAll,
    ResetPlayground,
    BrowsePrompts,
    NewExperiment,
    OpenSettings,
    Quit,
}

pub fn build_menu(ui: &mut egui::Ui, theme: &mut ThemeChoice, panel_count: usize) -> MenuAction {
    let mut menu_action = MenuAction::None;
    let original_theme = *theme;

    ui.menu_button("Playground", |ui| {
        if ui.button("Add Panel").clicked() {
            menu_action = MenuAction::AddPanel;
        }
        if ui.button(format!("Run All ({} panels)", panel_count)).clicked() {
            menu_action = MenuAction::RunAll;
        }
        if ui.button("Reset Playground").clicked() {
            menu_action = MenuAction::ResetPlayground;
        }
        ui.separator();
        if ui.button("Settings...").clicked() {
            menu_action = MenuAction::OpenSettings;
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            menu_action = MenuAction::Quit;
        }
    });

    ui.menu_button("Prompts", |ui| {
        if ui.button("Browse Prompts...").clicked() {
            menu_action = MenuAction::BrowsePrompts;
        }
        if ui.button("New Dataset Run...").clicked() {
            menu_action = MenuAction::NewExperiment;
        }
    });

    ui.menu_button(RichText::new("🎨").size(18.0), |ui| {
        for choice in ThemeChoice::ALL {
            ui.radio_value(theme, choice, choice.to_string());
        }
    });

    if menu_action == MenuAction::None && original_theme != *theme {
        menu_action = MenuAction::ThemeChanged;
    }

    menu_action
}
