//! Core application modules for Prompt Playground.
//!
//! # Module Organization
//!
//! - [`chat`] - Message store, drag reorder controller and request building
//! - [`api_client`] - HTTP clients for completions, prompts and LLM connections
//! - [`config`] - Persisted backend settings
//! - [`dashui`] - User interface: playground panels, chat box and windows
//! - [`notifications`] - Notification system for user feedback
//!
//! The chat core knows nothing about egui or HTTP; [`dashui`] drives it and
//! hands finished requests to [`api_client`] on a worker thread.

pub mod api_client;
pub mod chat;
pub mod config;
pub mod dashui;
pub mod notifications;

pub use dashui::app::PlaygroundApp;
