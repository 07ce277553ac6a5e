//! Domain entity definitions.

mod alert;
mod coin;
mod session;
mod token;
mod user;

pub use alert::{Alert, AlertType, NewAlert};
pub use coin::{Coin, DEFAULT_COINS, default_coins};
pub use session::Session;
pub use token::SessionToken;
pub use user::User;
