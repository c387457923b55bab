//! User notices.
//!
//! Every user-facing error is a blocking notice. The core only sees the
//! [`Notifier`] capability, the browser binding lives in [`AlertNotifier`].

use crate::AppError;

/// Shows a blocking message to the user.
pub trait Notifier {
    fn alert(&self, message: &str);

    /// Show an error using its user-facing text.
    fn report(&self, error: &AppError) {
        self.alert(&error.to_string());
    }
}

/// `window.alert` notifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn alert(&self, message: &str) {
        let shown = web_sys::window()
            .map(|window| window.alert_with_message(message).is_ok())
            .unwrap_or(false);

        if !shown {
            log::error!("Could not display alert: {}", message);
        }
    }
}
