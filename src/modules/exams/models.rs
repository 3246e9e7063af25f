use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_EXAM_TYPE: &str = "Mid-term";

/// 表单可选考试类型
pub const EXAM_TYPES: [&str; 4] = ["Mid-term", "Final", "Quiz", "Assignment"];

/// 表单可选时间段
pub const TIME_SLOTS: [&str; 4] = [
    "09:00 AM - 11:00 AM",
    "11:30 AM - 1:30 PM",
    "2:00 PM - 4:00 PM",
    "4:30 PM - 6:30 PM",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExamSchedule {
    pub id: String,
    pub subject: String,
    pub exam_type: String,
    pub date: String,
    pub time: String,
    pub room: String,
    pub created_by: String,
}

/// 新建考试安排表单
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ExamDraft {
    pub subject: String,
    pub exam_type: String,
    pub date: String,
    pub time: String,
    pub room: String,
}

impl Default for ExamDraft {
    fn default() -> Self {
        Self {
            subject: String::new(),
            exam_type: DEFAULT_EXAM_TYPE.to_string(),
            date: String::new(),
            time: String::new(),
            room: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ExamQuery {
    pub search: Option<String>,
    /// `all` or an exact exam type.
    #[serde(rename = "type")]
    pub exam_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExamListing {
    pub exams: Vec<ExamSchedule>,
    /// `all` followed by every distinct exam type in first-seen order.
    pub exam_types: Vec<String>,
}
