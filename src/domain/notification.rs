use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warn,
    Error,
}

/// A toast: a short title plus a description line.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    pub created_at: Instant,
    pub displayed_at: Option<Instant>,
    pub duration: Duration,
}

impl Notification {
    #[must_use]
    pub fn new(
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            created_at: Instant::now(),
            displayed_at: None,
            duration: Duration::from_secs(5),
        }
    }

    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title, message)
    }

    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title, message)
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    pub fn mark_displayed(&mut self) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(Instant::now());
        }
    }
}
