//! Toast notifier
//!
//! At most one toast is visible. A new notification replaces the current one
//! and a toast disappears on its own once its time to live has passed.

use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::time::Instant;

use crate::ports::outbound::{NotificationKind, Notifier};

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(3000);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Toast {
    pub message: String,
    pub kind: NotificationKind,
    #[serde(skip)]
    shown_at: Instant,
}

impl Toast {
    pub fn shown_at(&self) -> Instant {
        self.shown_at
    }
}

pub struct ToastNotifier {
    current: Mutex<Option<Toast>>,
    ttl: Duration,
    feed: broadcast::Sender<Toast>,
}

impl ToastNotifier {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TOAST_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        let (feed, _) = broadcast::channel(16);
        Self {
            current: Mutex::new(None),
            ttl,
            feed,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The visible toast, if it has not expired
    pub fn current(&self) -> Option<Toast> {
        let mut current = self.current.lock();
        if current.as_ref().is_some_and(|t| t.shown_at.elapsed() >= self.ttl) {
            *current = None;
        }
        current.clone()
    }

    pub fn dismiss(&self) {
        self.current.lock().take();
    }

    /// Every toast shown from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.feed.subscribe()
    }
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        let toast = Toast {
            message: message.to_string(),
            kind,
            shown_at: Instant::now(),
        };
        tracing::debug!(%kind, text = message, "toast");
        *self.current.lock() = Some(toast.clone());
        // No subscribers is fine
        let _ = self.feed.send(toast);
    }
}
