// src/notify.rs
//! Transient user-facing notifications

use std::time::{Duration, Instant};

use crate::app_log;

/// Public page alerts stay up this long.
pub const ALERT_TTL: Duration = Duration::from_millis(5000);
/// Admin toasts stay up this long.
pub const TOAST_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "❌",
            Self::Info => "ℹ️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Prints each notification once; a terminal line never needs dismissing.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: Notification) {
        app_log!(debug, "Notification {:?}: {}", notification.kind, notification.message);
        eprintln!("{} {}", notification.kind.icon(), notification.message);
    }
}

#[derive(Debug, Clone)]
struct Toast {
    notification: Notification,
    expires_at: Instant,
}

/// Auto-dismissing notifications. In single mode a new alert replaces the visible one,
/// otherwise toasts stack until their own deadline.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    ttl: Duration,
    single: bool,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    /// Public page alerts: one at a time.
    pub fn alerts(ttl: Duration) -> Self {
        Self {
            ttl,
            single: true,
            toasts: Vec::new(),
        }
    }

    /// Admin toasts: stacked.
    pub fn stacked(ttl: Duration) -> Self {
        Self {
            ttl,
            single: false,
            toasts: Vec::new(),
        }
    }

    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        if self.single {
            self.toasts.clear();
        }
        self.toasts.push(Toast {
            notification,
            expires_at: now + self.ttl,
        });
    }

    /// Notifications still visible at `now`, oldest first.
    pub fn visible_at(&self, now: Instant) -> Vec<&Notification> {
        self.toasts
            .iter()
            .filter(|t| t.expires_at > now)
            .map(|t| &t.notification)
            .collect()
    }

    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Close button.
    pub fn dismiss(&mut self, index: usize) {
        if index < self.toasts.len() {
            self.toasts.remove(index);
        }
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.toasts.last().map(|t| &t.notification)
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }
}
