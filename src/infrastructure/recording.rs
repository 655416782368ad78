use crate::config::ContactDetails;
use crate::domain::notification::Notification;
use crate::domain::ports::PaymentSurface;
use crate::domain::selection::ActiveChoice;

/// Submit control as last rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub enabled: bool,
    pub busy: bool,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            label: "Select Amount".to_string(),
            enabled: false,
            busy: false,
        }
    }
}

/// A headless surface that remembers what was rendered.
///
/// Used by the batch CLI and by tests to observe the session.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub amount_display: String,
    pub submit: SubmitControl,
    pub custom_input_visible: bool,
    pub highlighted: Option<ActiveChoice>,
    pub notifications: Vec<Notification>,
    /// Offline instructions, once the card form has been replaced.
    pub fallback: Option<Vec<String>>,
    /// Number of times the control entered the busy state.
    pub busy_count: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            amount_display: "$0".to_string(),
            ..Self::default()
        }
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }
}

impl PaymentSurface for RecordingSurface {
    fn show_amount(&mut self, display: &str) {
        self.amount_display = display.to_string();
    }

    fn show_submit(&mut self, label: &str, enabled: bool) {
        self.submit = SubmitControl {
            label: label.to_string(),
            enabled,
            busy: false,
        };
    }

    fn show_busy(&mut self) {
        self.submit = SubmitControl {
            label: "Processing...".to_string(),
            enabled: false,
            busy: true,
        };
        self.busy_count += 1;
    }

    fn show_custom_input(&mut self, visible: bool) {
        self.custom_input_visible = visible;
    }

    fn highlight(&mut self, choice: Option<ActiveChoice>) {
        self.highlighted = choice;
    }

    fn notify(&mut self, notification: Notification) {
        tracing::debug!(kind = ?notification.kind, message = %notification.message, "Notification");
        self.notifications.push(notification);
    }

    fn show_fallback(&mut self, contact: &ContactDetails) {
        self.fallback = Some(contact.fallback_instructions());
    }
}
