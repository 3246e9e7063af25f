//! 管理员设置
//! Settings sections and the event-type catalog. Callers check the admin role first.

use serde_json::Value;

use crate::comm::Notification;
use crate::error::{AppError, AppResult};
use crate::modules::settings::models::{
    EventTypeEntry, EventTypeUpdate, NewEventType, PortalSettings, SettingsSection,
    DEFAULT_EVENT_TYPE_COLOR,
};

/// 事件类型 id：小写，连续空白替换为 `-`
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn empty_name() -> AppError {
    AppError::settings("Event type name cannot be empty")
}

impl PortalSettings {
    /// 保存一个设置分区，body 必须能解析为该分区的完整结构
    pub fn save_section(&mut self, section: SettingsSection, body: Value) -> AppResult<Notification> {
        match section {
            SettingsSection::General => self.general = serde_json::from_value(body)?,
            SettingsSection::Notifications => self.notifications = serde_json::from_value(body)?,
            SettingsSection::Permissions => self.permissions = serde_json::from_value(body)?,
        }

        tracing::info!(section = %section, "settings saved");
        Ok(Notification::info(
            "Settings Saved",
            format!("{} settings have been updated successfully.", section.label()),
        ))
    }

    pub fn add_event_type(&mut self, request: NewEventType) -> AppResult<EventTypeEntry> {
        if request.name.trim().is_empty() {
            return Err(empty_name());
        }

        let id = slugify(&request.name);
        if self.event_types.iter().any(|entry| entry.id == id) {
            return Err(AppError::settings("This event type already exists"));
        }

        let entry = EventTypeEntry {
            id,
            name: request.name,
            color: DEFAULT_EVENT_TYPE_COLOR.to_string(),
        };
        self.event_types.push(entry.clone());
        Ok(entry)
    }

    pub fn update_event_type(&mut self, id: &str, update: EventTypeUpdate) -> AppResult<EventTypeEntry> {
        if update.name.trim().is_empty() {
            return Err(empty_name());
        }

        let entry = self
            .event_types
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| AppError::not_found(format!("event type {}", id)))?;

        entry.name = update.name;
        if let Some(color) = update.color {
            entry.color = color;
        }
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Field  Trip"), "field-trip");
        assert_eq!(slugify("Workshop"), "workshop");
        assert_eq!(slugify(" Guest\tLecture "), "guest-lecture");
    }

    #[test]
    fn test_add_event_type() {
        let mut settings = PortalSettings::default();
        let entry = settings
            .add_event_type(NewEventType {
                name: "Field Trip".to_string(),
            })
            .unwrap();
        assert_eq!(entry.id, "field-trip");
        assert_eq!(entry.color, "var(--primary)");
        assert_eq!(settings.event_types.len(), 5);

        let duplicate = settings.add_event_type(NewEventType {
            name: "field   trip".to_string(),
        });
        assert_eq!(
            duplicate.unwrap_err().to_string(),
            "This event type already exists"
        );

        let empty = settings.add_event_type(NewEventType {
            name: "  ".to_string(),
        });
        let err = empty.unwrap_err();
        assert_eq!(err.to_string(), "Event type name cannot be empty");
        assert_eq!(err.notification().unwrap().title, "Error");
        assert_eq!(settings.event_types.len(), 5);
    }

    #[test]
    fn test_update_event_type() {
        let mut settings = PortalSettings::default();
        let entry = settings
            .update_event_type(
                "exam",
                EventTypeUpdate {
                    name: "Examination".to_string(),
                    color: None,
                },
            )
            .unwrap();
        assert_eq!(entry.name, "Examination");
        assert_eq!(entry.color, "var(--event-exam)");

        assert!(matches!(
            settings.update_event_type("party", EventTypeUpdate { name: "Party".to_string(), color: None }),
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            settings.update_event_type("exam", EventTypeUpdate::default()),
            Err(AppError::Settings { .. })
        ));
    }

    #[test]
    fn test_save_section() {
        let mut settings = PortalSettings::default();
        let toast = settings
            .save_section(
                SettingsSection::Notifications,
                json!({
                    "emailNewNotices": false,
                    "examReminders": true,
                    "holidayReminders": true,
                    "dailyDigest": false
                }),
            )
            .unwrap();
        assert_eq!(toast.title, "Settings Saved");
        assert_eq!(
            toast.description,
            "Notification settings have been updated successfully."
        );
        assert!(settings.notifications.holiday_reminders);

        let bad = settings.save_section(SettingsSection::General, json!({"institutionName": 3}));
        assert!(matches!(bad, Err(AppError::Json(_))));
        assert_eq!(settings.general.institution_name, "Campus Connect Academy");
    }
}
