//! Desktop user interface for Prompt Playground.
//!
//! # Components
//!
//! - [`app::PlaygroundApp`] - Application shell: menu bar, status bar, central panel, windows
//! - [`playground::Playground`] - Row of independent panels with Run All / Reset
//! - [`playground_panel::PlaygroundPanel`] - One conversation, its attachments and its output
//! - [`chat_box::ChatBox`] - Editable, drag-reorderable message list
//! - [`new_experiment_window::NewExperimentWindow`] - Dataset run form
//! - [`prompts_window::PromptsWindow`] - Prompt list, opens a prompt in a new panel
//! - [`settings_window::SettingsWindow`] - Backend connection settings
//! - [`menu`] - Top menu bar

pub mod app;
pub mod chat_box;
pub mod menu;
pub mod new_experiment_window;
pub mod playground;
pub mod playground_panel;
pub mod prompts_window;
pub mod settings_window;

pub use app::{PlaygroundApp, ThemeChoice};
pub use chat_box::ChatBox;
pub use new_experiment_window::NewExperimentWindow;
pub use playground::Playground;
pub use playground_panel::PlaygroundPanel;
pub use prompts_window::PromptsWindow;
pub use settings_window::SettingsWindow;
