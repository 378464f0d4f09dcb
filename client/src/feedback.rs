use std::time::Duration;

use crate::routes::Route;

/// How long a notification stays up before it dismisses itself.
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(1500);
pub const DISMISS_ACTION: &str = "Dismiss";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
    Info,
}

/// A transient message with a single dismiss action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub action: &'static str,
    pub duration: Duration,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: DISMISS_ACTION,
            duration: NOTIFICATION_DURATION,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == NotificationKind::Failure
    }
}

/// The UI side effect of one completed request: a notification and, on
/// success, possibly a route change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub notification: Notification,
    pub redirect: Option<Route>,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self::notify(NotificationKind::Success, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::notify(NotificationKind::Failure, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::notify(NotificationKind::Info, message)
    }

    /// Navigate to `route` once the notification is shown.
    #[must_use]
    pub fn then(mut self, route: Route) -> Self {
        self.redirect = Some(route);
        self
    }

    pub fn is_success(&self) -> bool {
        self.notification.kind == NotificationKind::Success
    }

    fn notify(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            notification: Notification::new(kind, message),
            redirect: None,
        }
    }
}
