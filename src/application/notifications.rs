//! Transient user notifications and the single place failures are reported.

use crate::domain::{FailureClass, NoticeLevel};
use std::fmt::Display;
use std::time::{Duration, Instant};

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.items.push(Notification {
            level,
            message: message.into(),
            created_at: Instant::now(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    /// Logs a failure and, if its class calls for it, shows `message` to the
    /// user. `detail` only goes to the log.
    pub fn report(&mut self, class: FailureClass, message: &str, detail: &dyn Display) {
        let policy = class.policy();
        log::log!(policy.log_level, "{message}: {detail}");

        if let Some(level) = policy.notice {
            self.push(level, message);
        }
    }

    /// Drops notifications older than [`NOTIFICATION_TTL`].
    pub fn prune(&mut self, now: Instant) {
        self.items
            .retain(|n| now.saturating_duration_since(n.created_at) < NOTIFICATION_TTL);
    }

    /// Most recent notifications first, at most `limit`.
    pub fn latest(&self, limit: usize) -> impl Iterator<Item = &Notification> {
        self.items.iter().rev().take(limit)
    }

    pub fn last(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_follows_policy() {
        let mut notifications = Notifications::default();
        notifications.report(FailureClass::ReferenceData, "Failed to load states", &"timeout");

        let last = notifications.last().unwrap();
        assert_eq!(last.level, NoticeLevel::Warning);
        assert_eq!(last.message, "Failed to load states");
    }

    #[test]
    fn test_prune_expires_old_notifications() {
        let mut notifications = Notifications::default();
        notifications.success("Person created successfully");
        assert_eq!(notifications.len(), 1);

        let created = notifications.last().unwrap().created_at;
        notifications.prune(created + Duration::from_secs(1));
        assert_eq!(notifications.len(), 1);

        notifications.prune(created + NOTIFICATION_TTL);
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_latest_is_newest_first() {
        let mut notifications = Notifications::default();
        notifications.info("first");
        notifications.info("second");
        notifications.info("third");

        let messages: Vec<&str> = notifications.latest(2).map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["third", "second"]);
    }
}
