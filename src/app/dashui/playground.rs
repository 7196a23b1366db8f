//! Side-by-side playground panels.
//!
//! Each [`PlaygroundPanel`] owns an independent message store; nothing is
//! shared between panels except the configuration passed in per frame.

use super::playground_panel::{PanelAction, PanelSeed, PlaygroundPanel};
use crate::app::config::PlaygroundConfig;
use crate::app::notifications::NotificationManager;
use egui::{Key, KeyboardShortcut, Modifiers, ScrollArea, Ui};
use tracing::info;

pub const RUN_ALL_SHORTCUT: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND, Key::Enter);

/// Requests the playground cannot satisfy by itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaygroundAction {
    OpenSettings,
}

pub struct Playground {
    panels: Vec<PlaygroundPanel>,
    next_panel_id: u64,
}

impl Default for Playground {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Playground {
    /// Start with a single panel, optionally pre-filled from a saved prompt
    pub fn new(seed: Option<PanelSeed>) -> Self {
        Self {
            panels: vec![PlaygroundPanel::new(1, seed)],
            next_panel_id: 2,
        }
    }

    pub fn panels(&self) -> &[PlaygroundPanel] {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut [PlaygroundPanel] {
        &mut self.panels
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn add_panel(&mut self) -> u64 {
        self.add_panel_with(None)
    }

    pub fn add_panel_with(&mut self, seed: Option<PanelSeed>) -> u64 {
        let id = self.next_panel_id;
        self.next_panel_id += 1;
        self.panels.push(PlaygroundPanel::new(id, seed));
        info!("Added playground panel {} ({} total)", id, self.panels.len());
        id
    }

    /// Remove a panel. The last remaining panel is never removed.
    pub fn remove_panel(&mut self, id: u64) {
        if self.panels.len() > 1 {
            self.panels.retain(|p| p.id != id);
        }
    }

    /// Discard every panel and start over with one fresh panel
    pub fn reset(&mut self) {
        let id = self.next_panel_id;
        self.next_panel_id += 1;
        self.panels = vec![PlaygroundPanel::new(id, None)];
        info!("Playground reset");
    }

    /// Submit every panel. Returns how many submissions were started.
    pub fn run_all(
        &mut self,
        config: &PlaygroundConfig,
        notifications: &mut NotificationManager,
    ) -> usize {
        self.panels
            .iter_mut()
            .map(|panel| panel.submit(config, notifications))
            .filter(|started| *started)
            .count()
    }

    /// Collect finished submissions. Returns `true` while any is in flight.
    pub fn poll(&mut self, notifications: &mut NotificationManager) -> bool {
        for panel in &mut self.panels {
            panel.poll(notifications);
        }
        self.panels.iter().any(PlaygroundPanel::is_pending)
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        config: &PlaygroundConfig,
        notifications: &mut NotificationManager,
    ) -> Option<PlaygroundAction> {
        let mut result = None;

        if ui.input_mut(|i| i.consume_shortcut(&RUN_ALL_SHORTCUT)) {
            self.run_all(config, notifications);
        }

        ui.horizontal(|ui| {
            ui.heading("Playground");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⟲ Reset playground").clicked() {
                    self.reset();
                }
                let shortcut = ui.ctx().format_shortcut(&RUN_ALL_SHORTCUT);
                if ui.button(format!("▶ Run All ({})", shortcut)).clicked() {
                    self.run_all(config, notifications);
                }
                if ui.button("+ Add Panel").clicked() {
                    self.add_panel();
                }
                ui.label(format!("{} windows", self.panels.len()));
            });
        });
        ui.separator();

        let show_remove_button = self.panels.len() > 1;
        let mut actions = Vec::new();
        ScrollArea::horizontal().id_salt("playground_panels").show(ui, |ui| {
            ui.horizontal_top(|ui| {
                for panel in &mut self.panels {
                    let action = panel.show(ui, config, show_remove_button, notifications);
                    if let Some(action) = action {
                        actions.push((panel.id, action));
                    }
                }
            });
        });

        for (panel_id, action) in actions {
            match action {
                PanelAction::Copy => {
                    self.add_panel();
                }
                PanelAction::Remove => self.remove_panel(panel_id),
                PanelAction::OpenSettings => result = Some(PlaygroundAction::OpenSettings),
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_drops_below_one_panel() {
        let mut playground = Playground::default();
        let only = playground.panels()[0].id;
        playground.remove_panel(only);
        assert_eq!(playground.panel_count(), 1);
    }

    #[test]
    fn test_add_and_remove_panels() {
        let mut playground = Playground::default();
        let second = playground.add_panel();
        let third = playground.add_panel();
        assert_eq!(playground.panel_count(), 3);
        playground.remove_panel(second);
        let ids: Vec<u64> = playground.panels().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, third]);
    }

    #[test]
    fn test_reset_gives_one_fresh_panel() {
        let mut playground = Playground::default();
        playground.add_panel();
        playground.panels_mut()[0].store.add_message();
        playground.reset();
        assert_eq!(playground.panel_count(), 1);
        assert_eq!(playground.panels()[0].store.len(), 2);
        assert_ne!(playground.panels()[0].id, 1);
    }

    #[test]
    fn test_panels_have_independent_stores() {
        let mut playground = Playground::default();
        playground.add_panel();
        playground.panels_mut()[0].store.add_placeholder();
        assert_eq!(playground.panels()[0].store.len(), 3);
        assert_eq!(playground.panels()[1].store.len(), 2);
    }

    #[test]
    fn test_run_all_with_incomplete_config_starts_nothing() {
        let mut playground = Playground::default();
        playground.add_panel();
        let mut notifications = NotificationManager::new();
        let started = playground.run_all(&PlaygroundConfig::default(), &mut notifications);
        assert_eq!(started, 0);
        assert_eq!(notifications.get_error_count(), 2);
    }
}
