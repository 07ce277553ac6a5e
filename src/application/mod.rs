//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Stateful interaction services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoginRequest, LoginResponse, TokenSource};
pub use services::{AuthGate, ConfirmationController, SessionStore, WizardController};
pub use use_cases::{HydrateSessionUseCase, LoginUseCase, LogoutUseCase, ValidateSessionUseCase};
