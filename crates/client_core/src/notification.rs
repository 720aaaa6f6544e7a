//! Transient toast shown after a successful mutation.

use std::time::{Duration, Instant};

pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationSeverity {
    #[default]
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationState {
    text: String,
    visible: bool,
    severity: NotificationSeverity,
    shown_at: Option<Instant>,
}

impl NotificationState {
    pub fn show(&mut self, text: impl Into<String>, severity: NotificationSeverity, now: Instant) {
        self.text = text.into();
        self.severity = severity;
        self.visible = true;
        self.shown_at = Some(now);
    }

    /// Text is kept so a fading toast can still render it.
    pub fn dismiss(&mut self) {
        self.visible = false;
        self.shown_at = None;
    }

    /// Hides the notification once the timeout has elapsed. Returns true if it was hidden by this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.shown_at {
            Some(shown_at)
                if self.visible
                    && now.saturating_duration_since(shown_at) >= NOTIFICATION_TIMEOUT =>
            {
                self.dismiss();
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let shown_at = self.shown_at.filter(|_| self.visible)?;
        Some(NOTIFICATION_TIMEOUT.saturating_sub(now.saturating_duration_since(shown_at)))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn severity(&self) -> NotificationSeverity {
        self.severity
    }
}
