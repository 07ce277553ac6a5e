//! UI screens.

mod app;
mod danger_zone;
mod home_screen;
mod loading_screen;
mod login_screen;
mod wizard_screen;

pub use app::{App, AppServices};
pub use danger_zone::{DangerKeyResult, DangerZone};
pub use home_screen::{HomeKeyResult, HomeScreen, Section};
pub use loading_screen::LoadingScreen;
pub use login_screen::{LoginAction, LoginScreen, LoginState};
pub use wizard_screen::{WizardKeyResult, WizardScreen};
