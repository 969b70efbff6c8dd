use std::time::Duration;

/// How long a success notification stays on screen
pub const SUCCESS_DISMISS_AFTER: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    /// Transient, dismisses itself, no buttons
    Success { dismiss_after: Duration },
    /// Stays until the user picks the single action
    Error { action: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            kind: NotificationKind::Success {
                dismiss_after: SUCCESS_DISMISS_AFTER,
            },
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: &str, action: &str) -> Self {
        Self {
            kind: NotificationKind::Error {
                action: action.to_string(),
            },
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, NotificationKind::Error { .. })
    }
}

/// Surface that shows export outcomes to the user
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Prints successes to stdout and errors to stderr
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notification: Notification) {
        match &notification.kind {
            NotificationKind::Success { .. } => {
                println!("{}: {}", notification.title, notification.message);
            }
            NotificationKind::Error { action } => {
                eprintln!("{}: {}", notification.title, notification.message);
                eprintln!("  [{}]", action);
            }
        }
    }
}

/// Keeps every notification, for callers that render them later
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notifications: Vec<Notification>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
