//! User-visible notifications
//!
//! Short toast-style messages raised by session operations (for example a
//! failed AI suggestion round-trip). The presentation layer drains the queue
//! and shows them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Type of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationType {
    /// Get the icon/prefix for this notification type
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Success => "+",
            Self::Warning => "!",
            Self::Error => "x",
        }
    }

    /// Get the default title for this notification type
    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// A toast notification
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Headline, e.g. "AI Budget Suggestions Applied"
    pub title: String,
    /// The notification message
    pub message: String,
    /// Type of notification
    pub notification_type: NotificationType,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a new notification titled after its type
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            title: notification_type.title().to_string(),
            message: message.into(),
            notification_type,
            created_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error)
    }

    /// Replace the default title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn is_error(&self) -> bool {
        self.notification_type == NotificationType::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.notification_type.icon(),
            self.title,
            self.message
        )
    }
}

/// A FIFO queue of notifications waiting to be shown
#[derive(Debug, Default)]
pub struct NotificationQueue {
    notifications: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification to the queue
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Take every pending notification, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }
}
