//! Notification channel and transient toast queue.
//!
//! # Design
//! - The core emits [`Notification`] values through a [`Notifier`]; the UI layer
//!   subscribes to the channel and renders toasts.
//! - Each toast carries its own expiry so concurrent toasts never interfere.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::rc::Rc;

/// Default lifetime of a toast in milliseconds.
pub const TOAST_TIMEOUT_MS: u32 = 5_000;

/// Notification severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    /// Informational message.
    Info,
    /// Successful action.
    Success,
    /// Failed action or validation error.
    Error,
}

/// A message emitted by the core for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Display text.
    pub text: String,
    /// Severity classification.
    pub kind: NotificationKind,
}

impl Notification {
    /// Informational notification.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NotificationKind::Info,
        }
    }

    /// Success notification.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NotificationKind::Success,
        }
    }

    /// Error notification.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Fire-and-forget sink for notifications.
pub trait Notifier {
    /// Emit a notification; no acknowledgement is returned.
    fn notify(&self, notification: Notification);
}

/// Sending half of the notification channel.
pub type NotificationSender = UnboundedSender<Notification>;

/// Receiving half of the notification channel.
pub type NotificationReceiver = UnboundedReceiver<Notification>;

/// Create the notification channel shared by the batch actions and the upload pipeline.
#[must_use]
pub fn notification_channel() -> (NotificationSender, NotificationReceiver) {
    unbounded()
}

impl Notifier for NotificationSender {
    fn notify(&self, notification: Notification) {
        if let Err(err) = self.unbounded_send(notification) {
            let lost = err.into_inner();
            tracing::warn!(text = %lost.text, "notification channel closed; message dropped");
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// A rendered toast.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    /// Display message.
    pub message: String,
    /// Severity classification.
    pub kind: NotificationKind,
    /// Absolute expiry timestamp in milliseconds.
    pub expires_at_ms: f64,
}

impl Toast {
    /// Milliseconds left before the toast expires at `now_ms`.
    #[must_use]
    pub fn remaining_ms(&self, now_ms: f64) -> u32 {
        let remaining = (self.expires_at_ms - now_ms).max(0.0).ceil();
        if remaining >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            // Bounded to [0, u32::MAX) above.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let remaining = remaining as u32;
            remaining
        }
    }
}

/// Ordered display list of live toasts.
#[derive(Clone, Debug, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    timeout_ms: u32,
    toasts: Vec<Toast>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(TOAST_TIMEOUT_MS)
    }
}

impl ToastQueue {
    /// Empty queue whose toasts live for `timeout_ms`.
    #[must_use]
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            next_id: 0,
            timeout_ms,
            toasts: Vec::new(),
        }
    }

    /// Append a toast created at `now_ms` and return its id.
    pub fn push(&mut self, notification: Notification, now_ms: f64) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            message: notification.text,
            kind: notification.kind,
            expires_at_ms: now_ms + f64::from(self.timeout_ms),
        });
        id
    }

    /// Remove a single toast by id.
    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Drop every toast that has expired at `now_ms`.
    pub fn expire(&mut self, now_ms: f64) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.expires_at_ms > now_ms);
        before - self.toasts.len()
    }

    /// Live toasts in display order.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}
