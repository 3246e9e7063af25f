use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    pub institution_name: String,
    pub contact_email: String,
    pub academic_year: String,
    pub description: String,
    pub public_calendar: bool,
    pub public_notices: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            institution_name: "Campus Connect Academy".to_string(),
            contact_email: "contact@campus-connect.edu".to_string(),
            academic_year: "2024-2025".to_string(),
            description: "Campus Connect Academy is a leading educational institution providing quality education and modern facilities to students.".to_string(),
            public_calendar: true,
            public_notices: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email_new_notices: bool,
    pub exam_reminders: bool,
    pub holiday_reminders: bool,
    pub daily_digest: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_new_notices: true,
            exam_reminders: true,
            holiday_reminders: false,
            daily_digest: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSettings {
    pub teacher_add_events: bool,
    pub teacher_add_notices: bool,
    pub teacher_manage_exams: bool,
    pub student_view_exams: bool,
    pub student_export_calendar: bool,
    pub student_download_notices: bool,
}

impl Default for PermissionSettings {
    fn default() -> Self {
        Self {
            teacher_add_events: true,
            teacher_add_notices: true,
            teacher_manage_exams: true,
            student_view_exams: true,
            student_export_calendar: true,
            student_download_notices: true,
        }
    }
}

/// 事件类型目录条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventTypeEntry {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl EventTypeEntry {
    fn new(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

pub const DEFAULT_EVENT_TYPE_COLOR: &str = "var(--primary)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortalSettings {
    pub general: GeneralSettings,
    pub notifications: NotificationSettings,
    pub permissions: PermissionSettings,
    pub event_types: Vec<EventTypeEntry>,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            notifications: NotificationSettings::default(),
            permissions: PermissionSettings::default(),
            event_types: vec![
                EventTypeEntry::new("holiday", "Holiday", "var(--event-holiday)"),
                EventTypeEntry::new("exam", "Exam", "var(--event-exam)"),
                EventTypeEntry::new("class", "Class", "var(--event-class)"),
                EventTypeEntry::new("seminar", "Seminar", "var(--event-seminar)"),
            ],
        }
    }
}

/// 设置分区
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SettingsSection {
    General,
    Notifications,
    Permissions,
}

impl SettingsSection {
    /// Name used in the "settings saved" notification.
    pub fn label(&self) -> &'static str {
        match self {
            SettingsSection::General => "General",
            SettingsSection::Notifications => "Notification",
            SettingsSection::Permissions => "Permission",
        }
    }
}

impl fmt::Display for SettingsSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SettingsSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(SettingsSection::General),
            "notifications" | "notification" => Ok(SettingsSection::Notifications),
            "permissions" | "permission" => Ok(SettingsSection::Permissions),
            other => Err(format!("unknown settings section '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewEventType {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EventTypeUpdate {
    pub name: String,
    /// Keeps the current color when absent.
    pub color: Option<String>,
}
