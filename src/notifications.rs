//! Toast notifications - transient in-app messages
//!
//! Shown as an overlay strip in the top-right corner:
//! - validation warnings from the transfer form
//! - load failures for a view
//! - confirmations for flag/block actions
//!
//! Toasts expire after a fixed interval and duplicates inside the window
//! are suppressed.

use std::time::{Duration, Instant};

/// Toast severity, mapped to a color in the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Danger,
}

/// A single toast
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    created: Instant,
}

/// Notification manager - owns the active toast stack
pub struct NotificationManager {
    toasts: Vec<Notification>,
    /// How long a toast stays on screen
    ttl: Duration,
}

impl NotificationManager {
    const DEFAULT_TTL_SECS: u64 = 5;

    /// Create a new notification manager
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(Self::DEFAULT_TTL_SECS))
    }

    /// Create with a custom time-to-live
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            ttl,
        }
    }

    /// Push a toast; an identical active message is suppressed
    pub fn push(&mut self, message: impl Into<String>, level: NotificationLevel) {
        self.push_at(message.into(), level, Instant::now());
    }

    fn push_at(&mut self, message: String, level: NotificationLevel, now: Instant) {
        self.sweep_at(now);

        if self.toasts.iter().any(|t| t.message == message) {
            log::debug!("Notification deduplicated: {}", message);
            return;
        }

        self.toasts.push(Notification {
            message,
            level,
            created: now,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, NotificationLevel::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, NotificationLevel::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, NotificationLevel::Warning);
    }

    pub fn danger(&mut self, message: impl Into<String>) {
        self.push(message, NotificationLevel::Danger);
    }

    /// Drop expired toasts
    pub fn sweep(&mut self) {
        self.sweep_at(Instant::now());
    }

    fn sweep_at(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.toasts.retain(|t| now.duration_since(t.created) < ttl);
    }

    /// Active toasts, newest last
    pub fn active(&self) -> &[Notification] {
        &self.toasts
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_active() {
        let mut manager = NotificationManager::new();
        manager.warning("Заполните все обязательные поля");
        manager.danger("Недостаточно средств на счёте");

        assert_eq!(manager.active().len(), 2);
        assert_eq!(manager.active()[0].level, NotificationLevel::Warning);
    }

    #[test]
    fn test_duplicate_suppressed() {
        let mut manager = NotificationManager::new();
        manager.info("Обновление...");
        manager.info("Обновление...");

        assert_eq!(manager.active().len(), 1);
    }

    #[test]
    fn test_expiry() {
        let mut manager = NotificationManager::with_ttl(Duration::from_millis(10));
        let start = Instant::now();
        manager.push_at("старое".to_string(), NotificationLevel::Info, start);

        manager.sweep_at(start + Duration::from_millis(50));
        assert!(manager.active().is_empty());
    }

    #[test]
    fn test_same_message_allowed_after_expiry() {
        let mut manager = NotificationManager::with_ttl(Duration::from_millis(10));
        let start = Instant::now();
        manager.push_at("повтор".to_string(), NotificationLevel::Info, start);
        manager.push_at(
            "повтор".to_string(),
            NotificationLevel::Info,
            start + Duration::from_millis(50),
        );

        assert_eq!(manager.active().len(), 1);
    }
}
