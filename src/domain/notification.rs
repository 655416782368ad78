use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A message for the donor. The surface decides how to show and dismiss it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// How long the message should stay visible.
    pub duration: Duration,
}

impl Notification {
    pub const GENERAL: Duration = Duration::from_secs(5);
    pub const DONATION: Duration = Duration::from_secs(8);
    pub const THANK_YOU: Duration = Duration::from_secs(10);

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            duration: Self::GENERAL,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            duration: Self::GENERAL,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
            duration: Self::GENERAL,
        }
    }

    pub fn lasting(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}
