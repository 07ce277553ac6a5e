mod card;
mod confirm_dialog;
mod input;
mod skeleton;
mod step_indicator;
mod toast;
mod toggle;

pub use card::Card;
pub use confirm_dialog::{ConfirmDialog, DialogLabels};
pub use input::TextInput;
pub use skeleton::Skeleton;
pub use step_indicator::StepIndicator;
pub use toast::ToastPopup;
pub use toggle::Toggle;
