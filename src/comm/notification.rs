//! 用户提示（toast）
//! Transient user-facing notifications

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// 待发送提示队列
/// Outbox drained into the next response; nothing is kept across requests.
#[derive(Debug, Default)]
pub struct Notifications {
    pending: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(title = %notification.title, "notification queued");
        self.pending.push(notification);
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_outbox() {
        let mut outbox = Notifications::default();
        outbox.push(Notification::info("Logged Out", "bye"));
        outbox.push(Notification::destructive("Login Failed", "nope"));

        let drained = outbox.drain();
        assert_eq!(drained.len(), 2);
        assert!(!drained[0].is_destructive());
        assert!(drained[1].is_destructive());
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_variant_wire_format() {
        let json = serde_json::to_value(Notification::destructive("a", "b")).unwrap();
        assert_eq!(json["variant"], "destructive");
    }
}
