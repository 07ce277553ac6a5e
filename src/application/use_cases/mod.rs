//! Use case implementations.

mod hydrate_session_use_case;
mod login_use_case;
mod logout_use_case;
mod validate_session_use_case;

pub use hydrate_session_use_case::{HydrateSessionUseCase, ResolvedToken};
pub use login_use_case::LoginUseCase;
pub use logout_use_case::LogoutUseCase;
pub use validate_session_use_case::ValidateSessionUseCase;
