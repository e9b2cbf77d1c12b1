//! Client side of the contact form: form state, validation, the submit
//! lifecycle and user notifications, independent of any UI toolkit.

pub use controller::{ContactFormController, SubmitOutcome};
pub use notifier::{Notification, NotificationLevel, Notifier};

mod controller;
mod notifier;
