use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::{Notification, NotificationLevel};

/// Queue of toasts shown one at a time, oldest first.
#[derive(Debug)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
    default_duration: Duration,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl NotificationManager {
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            default_duration,
        }
    }

    /// Queues a toast built elsewhere, such as the outcome of a form submission.
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(level = ?notification.level, title = %notification.title, "Queued notification");
        self.queue
            .push_back(notification.with_duration(self.default_duration));
    }

    pub fn notify(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(Notification::new(level, title, message));
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, title, message);
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, title, message);
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, title, message);
    }

    pub fn tick(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            front.mark_displayed();
            if front.is_expired() {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.mark_displayed();
                }
            }
        }
    }

    /// Drops the toast on screen.
    pub fn dismiss(&mut self) {
        self.queue.pop_front();
        if let Some(next) = self.queue.front_mut() {
            next.mark_displayed();
        }
    }

    #[must_use]
    pub fn current_notification(&self) -> Option<&Notification> {
        self.queue.front()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_pushed_notification_uses_default_duration() {
        let mut manager = NotificationManager::new(Duration::from_secs(2));
        manager.push(Notification::success("Culto salvo", "Culto \"Jovens\" registrado"));

        let current = manager.current_notification().unwrap();
        assert_eq!(current.duration, Duration::from_secs(2));
        assert_eq!(current.level, NotificationLevel::Success);
    }

    #[test]
    fn test_queueing() {
        let mut manager = NotificationManager::default();
        manager.success("1", "First");
        manager.error("2", "Second");

        assert_eq!(manager.current_notification().unwrap().title, "1");

        manager.tick();

        manager.queue.front_mut().unwrap().displayed_at =
            Some(Instant::now().checked_sub(Duration::from_secs(10)).unwrap());

        manager.tick();

        let second = manager.current_notification().unwrap();
        assert_eq!(second.title, "2");
        assert!(second.displayed_at.unwrap().elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_dismiss_advances_queue() {
        let mut manager = NotificationManager::default();
        manager.info("1", "First");
        manager.info("2", "Second");

        manager.dismiss();
        assert_eq!(manager.current_notification().unwrap().title, "2");
        manager.dismiss();
        assert!(!manager.has_notifications());
    }
}
