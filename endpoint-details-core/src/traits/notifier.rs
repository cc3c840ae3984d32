//! Notification collaborator Trait

use crate::types::Notification;

/// Receives one-shot, dismissible error notifications (toasts)
pub trait Notifier: Send + Sync {
    fn notify_error(&self, notification: &Notification);
}

/// Notifier that only writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_error(&self, notification: &Notification) {
        log::warn!(
            "[{}] {}: {}",
            notification.id,
            notification.title,
            notification.body
        );
    }
}
