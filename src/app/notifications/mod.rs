use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub mod details_window;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    Error,
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub notification_type: NotificationType,
    pub message: String,
    pub details: Option<String>,
    #[serde(skip, default = "Instant::now")]
    pub created_at: Instant,
    #[serde(skip, default)]
    pub expires_at: Option<Instant>,
    /// Position in the order notifications were raised, assigned by the manager
    #[serde(default)]
    pub seq: u64,
    pub source: String, // e.g., "Playground", "New Experiment"
}

impl Notification {
    fn with_lifetime(
        id: String,
        title: String,
        notification_type: NotificationType,
        message: String,
        source: String,
        lifetime: Option<Duration>,
    ) -> Self {
        let now = Instant::now();
        Self {
            id,
            title,
            notification_type,
            message,
            details: None,
            created_at: now,
            expires_at: lifetime.map(|d| now + d),
            seq: 0,
            source,
        }
    }

    pub fn new_error(id: String, title: String, message: String, source: String) -> Self {
        // Errors don't auto-expire
        Self::with_lifetime(id, title, NotificationType::Error, message, source, None)
    }

    pub fn new_warning(id: String, title: String, message: String, source: String) -> Self {
        Self::with_lifetime(
            id,
            title,
            NotificationType::Warning,
            message,
            source,
            Some(Duration::from_secs(30)),
        )
    }

    pub fn new_info(id: String, title: String, message: String, source: String) -> Self {
        Self::with_lifetime(
            id,
            title,
            NotificationType::Info,
            message,
            source,
            Some(Duration::from_secs(10)),
        )
    }

    pub fn new_success(id: String, title: String, message: String, source: String) -> Self {
        Self::with_lifetime(
            id,
            title,
            NotificationType::Success,
            message,
            source,
            Some(Duration::from_secs(5)),
        )
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.map(|at| now > at).unwrap_or(false)
    }

    pub fn get_color(&self) -> Color32 {
        match self.notification_type {
            NotificationType::Error => Color32::from_rgb(220, 50, 50),
            NotificationType::Warning => Color32::from_rgb(255, 150, 0),
            NotificationType::Info => Color32::from_rgb(70, 130, 200),
            NotificationType::Success => Color32::from_rgb(40, 180, 40),
        }
    }

    pub fn get_icon(&self) -> &'static str {
        match self.notification_type {
            NotificationType::Error => "✗",
            NotificationType::Warning => "⚠",
            NotificationType::Info => "ℹ",
            NotificationType::Success => "✓",
        }
    }
}

/// Holds user-facing notifications raised by panels and windows.
///
/// Errors stay until dismissed; other kinds expire on their own.
#[derive(Default)]
pub struct NotificationManager {
    notifications: HashMap<String, Notification>,
    next_seq: u64,
    pub show_details_window: bool,
    pub selected_notification_id: Option<String>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_notification(&mut self, mut notification: Notification) {
        self.next_seq += 1;
        notification.seq = self.next_seq;
        self.notifications
            .insert(notification.id.clone(), notification);
    }

    /// Id for the next notification; matches the sequence number it will get
    fn next_id(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.next_seq + 1)
    }

    pub fn notify_error(&mut self, source: &str, title: &str, message: impl Into<String>) {
        let id = self.next_id("error");
        self.add_notification(Notification::new_error(
            id,
            title.to_string(),
            message.into(),
            source.to_string(),
        ));
    }

    /// Error with a longer explanation shown in the details window
    pub fn notify_error_with_details(
        &mut self,
        source: &str,
        title: &str,
        message: impl Into<String>,
        details: impl Into<String>,
    ) {
        let id = self.next_id("error");
        self.add_notification(
            Notification::new_error(id, title.to_string(), message.into(), source.to_string())
                .with_details(details),
        );
    }

    pub fn notify_warning(&mut self, source: &str, title: &str, message: impl Into<String>) {
        let id = self.next_id("warning");
        self.add_notification(Notification::new_warning(
            id,
            title.to_string(),
            message.into(),
            source.to_string(),
        ));
    }

    pub fn notify_info(&mut self, source: &str, title: &str, message: impl Into<String>) {
        let id = self.next_id("info");
        self.add_notification(Notification::new_info(
            id,
            title.to_string(),
            message.into(),
            source.to_string(),
        ));
    }

    pub fn notify_success(&mut self, source: &str, title: &str, message: impl Into<String>) {
        let id = self.next_id("success");
        self.add_notification(Notification::new_success(
            id,
            title.to_string(),
            message.into(),
            source.to_string(),
        ));
    }

    pub fn dismiss_notification(&mut self, id: &str) {
        self.notifications.remove(id);
        if self.selected_notification_id.as_deref() == Some(id) {
            self.selected_notification_id = None;
            self.show_details_window = false;
        }
    }

    pub fn clear_expired(&mut self) {
        self.clear_expired_at(Instant::now());
    }

    pub fn clear_expired_at(&mut self, now: Instant) {
        self.notifications.retain(|_, n| !n.is_expired_at(now));
    }

    /// Newest first
    pub fn get_active_notifications(&self) -> Vec<&Notification> {
        let mut notifications: Vec<&Notification> = self.notifications.values().collect();
        notifications.sort_by(|a, b| b.seq.cmp(&a.seq));
        notifications
    }

    pub fn get_notification(&self, id: &str) -> Option<&Notification> {
        self.notifications.get(id)
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    fn count_of(&self, kind: NotificationType) -> usize {
        self.notifications
            .values()
            .filter(|n| n.notification_type == kind)
            .count()
    }

    pub fn get_error_count(&self) -> usize {
        self.count_of(NotificationType::Error)
    }

    pub fn get_warning_count(&self) -> usize {
        self.count_of(NotificationType::Warning)
    }

    pub fn show_notification_details(&mut self, notification_id: String) {
        self.selected_notification_id = Some(notification_id);
        self.show_details_window = true;
    }

    fn first_of(&self, kind: NotificationType) -> Option<String> {
        self.get_active_notifications()
            .into_iter()
            .find(|n| n.notification_type == kind)
            .map(|n| n.id.clone())
    }

    pub fn render_status_bar_indicator(&mut self, ui: &mut egui::Ui) {
        self.clear_expired();

        let error_count = self.get_error_count();
        let warning_count = self.get_warning_count();

        if error_count == 0 && warning_count == 0 {
            return;
        }
        ui.separator();

        if error_count > 0 {
            let error_text = if error_count == 1 {
                "1 error".to_string()
            } else {
                format!("{} errors", error_count)
            };
            let clicked = ui
                .add(
                    egui::Label::new(
                        egui::RichText::new(format!("✗ {}", error_text))
                            .color(Color32::from_rgb(220, 50, 50)),
                    )
                    .sense(egui::Sense::click()),
                )
                .clicked();
            if clicked {
                if let Some(id) = self.first_of(NotificationType::Error) {
                    self.show_notification_details(id);
                }
            }
        }

        if warning_count > 0 {
            let warning_text = if warning_count == 1 {
                "1 warning".to_string()
            } else {
                format!("{} warnings", warning_count)
            };
            let clicked = ui
                .add(
                    egui::Label::new(
                        egui::RichText::new(format!("⚠ {}", warning_text))
                            .color(Color32::from_rgb(255, 150, 0)),
                    )
                    .sense(egui::Sense::click()),
                )
                .clicked();
            if clicked {
                if let Some(id) = self.first_of(NotificationType::Warning) {
                    self.show_notification_details(id);
                }
            }
        }
    }

    /// Short-lived info/success notices stacked in the bottom-right corner
    pub fn render_toasts(&mut self, ctx: &egui::Context) {
        let toasts: Vec<(String, &'static str, Color32, String)> = self
            .get_active_notifications()
            .into_iter()
            .filter(|n| {
                matches!(
                    n.notification_type,
                    NotificationType::Info | NotificationType::Success
                )
            })
            .take(3)
            .map(|n| (n.id.clone(), n.get_icon(), n.get_color(), n.message.clone()))
            .collect();

        if toasts.is_empty() {
            return;
        }

        let mut dismissed = Vec::new();
        egui::Area::new(egui::Id::new("notification_toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -36.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for (id, icon, color, message) in &toasts {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.colored_label(*color, *icon);
                            ui.label(message);
                            if ui.small_button("✕").clicked() {
                                dismissed.push(id.clone());
                            }
                        });
                    });
                }
            });

        for id in dismissed {
            self.dismiss_notification(&id);
        }
        // Keep repainting so expiry is noticed without user input
        ctx.request_repaint_after(Duration::from_millis(500));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_never_expire() {
        let mut manager = NotificationManager::new();
        manager.notify_error("Playground", "Submit failed", "boom");
        manager.clear_expired_at(Instant::now() + Duration::from_secs(3600));
        assert_eq!(manager.get_error_count(), 1);
    }

    #[test]
    fn test_success_expires_after_five_seconds() {
        let mut manager = NotificationManager::new();
        manager.notify_success("Settings", "Saved", "ok");
        manager.clear_expired_at(Instant::now() + Duration::from_secs(2));
        assert_eq!(manager.len(), 1);
        manager.clear_expired_at(Instant::now() + Duration::from_secs(6));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_newest_first_past_nine() {
        let mut manager = NotificationManager::new();
        for i in 0..12 {
            manager.notify_error("Playground", "Chat failed", format!("failure {}", i));
        }
        let messages: Vec<&str> = manager
            .get_active_notifications()
            .iter()
            .take(4)
            .map(|n| n.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec!["failure 11", "failure 10", "failure 9", "failure 8"]
        );
        assert_eq!(manager.get_active_notifications()[0].id, "error_12");
    }

    #[test]
    fn test_error_details_are_kept() {
        let mut manager = NotificationManager::new();
        manager.notify_error_with_details(
            "Settings",
            "Could not load settings",
            "short",
            "long chain",
        );
        let notification = manager.get_active_notifications()[0];
        assert_eq!(notification.message, "short");
        assert_eq!(notification.details.as_deref(), Some("long chain"));
    }

    #[test]
    fn test_dismiss_closes_details() {
        let mut manager = NotificationManager::new();
        manager.notify_warning("Playground", "Config", "missing model");
        let id = manager.get_active_notifications()[0].id.clone();
        manager.show_notification_details(id.clone());
        manager.dismiss_notification(&id);
        assert!(!manager.show_details_window);
        assert!(manager.selected_notification_id.is_none());
    }
}
