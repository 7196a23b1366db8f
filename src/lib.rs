//! Prompt Playground - desktop client for experimenting with chat prompts
//!
//! Prompt Playground lets you compose a chat conversation, reorder it by drag and drop, and
//! submit it to an LLM backend for a completion. Several panels can run side by side so prompt
//! variants can be compared against each other.
//!
//! # Architecture Overview
//!
//! - **Chat core** ([`app::chat`]): the ordered message store, drag reorder state machine and
//!   the conversion of a conversation into a chat-completion request. No UI types in here.
//! - **Backend access** ([`app::api_client`]): blocking HTTP clients for completions, prompt
//!   listings and LLM connections.
//! - **Configuration** ([`app::config`]): TOML settings file under the user's config directory.
//! - **UI Layer** ([`app::dashui`]): egui windows and widgets built on top of the above.
//! - **Notifications** ([`app::notifications`]): toasts and a details window for surfacing
//!   errors without interrupting the user.
//!
//! # Getting Started
//!
//! The main entry point is [`PlaygroundApp`], an [`eframe::App`] that owns the playground, the
//! settings and the dataset-run window.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub use app::PlaygroundApp;
