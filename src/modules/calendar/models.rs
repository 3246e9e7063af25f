use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

/// 日历事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Holiday,
    Exam,
    Class,
    Seminar,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Holiday,
        EventType::Exam,
        EventType::Class,
        EventType::Seminar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Holiday => "holiday",
            EventType::Exam => "exam",
            EventType::Class => "class",
            EventType::Seminar => "seminar",
        }
    }

    /// Display name, e.g. `Seminar`.
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Holiday => "Holiday",
            EventType::Exam => "Exam",
            EventType::Class => "Class",
            EventType::Seminar => "Seminar",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "holiday" => Ok(EventType::Holiday),
            "exam" => Ok(EventType::Exam),
            "class" => Ok(EventType::Class),
            "seminar" => Ok(EventType::Seminar),
            other => Err(format!("unknown event type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub event_type: EventType,
    pub start_date: String,
    pub end_date: String,
    pub created_by: String,
}

/// 新建事件表单
/// Body of `POST /api/events`. `eventType` stays a string so a missing value is a validation error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub event_type: String,
    pub start_date: String,
    pub end_date: String,
}

/// Query of `GET /api/events`; `types` is a comma separated list of shown types.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct EventQuery {
    pub search: Option<String>,
    pub types: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Day,
    Week,
    #[default]
    Month,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct CalendarViewQuery {
    pub view: Option<CalendarView>,
    /// Anchor date, `YYYY-MM-DD`; today when absent.
    pub date: Option<String>,
    /// Comma separated event types to show; every type when absent.
    pub types: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct EventTypeQuery {
    pub types: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: String,
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarViewResponse {
    pub view: CalendarView,
    pub anchor: String,
    pub previous: String,
    pub next: String,
    pub days: Vec<CalendarDay>,
}
