//! Coinalert - a terminal client for cryptocurrency price alerts.
//!
//! This crate provides the interaction core of the alert client: a step-gated
//! alert creation wizard, confirmation dialogs guarding destructive actions,
//! and an authentication gate in front of the application surface.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing services, use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "coinalert";
