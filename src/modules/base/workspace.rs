//! 客户端工作区
//! One client's in-memory copy of the entity collections plus the generic create flow.

use chrono::{SecondsFormat, Utc};

use crate::comm::Notification;
use crate::error::{AppError, AppResult};
use crate::modules::auth::models::{Role, User};
use crate::modules::auth::session::SessionContext;
use crate::modules::base::seed;
use crate::modules::calendar::models::{CalendarEvent, EventDraft, EventType};
use crate::modules::exams::models::{ExamDraft, ExamSchedule, DEFAULT_EXAM_TYPE};
use crate::modules::holidays::models::{Holiday, HolidayDraft};
use crate::modules::notices::models::{Notice, NoticeDraft};

#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub events: Vec<CalendarEvent>,
    pub notices: Vec<Notice>,
    pub exams: Vec<ExamSchedule>,
    pub holidays: Vec<Holiday>,
}

impl Workspace {
    /// 以演示数据初始化
    pub fn seeded() -> Self {
        Self {
            events: seed::EVENTS.clone(),
            notices: seed::NOTICES.clone(),
            exams: seed::EXAMS.clone(),
            holidays: seed::HOLIDAYS.clone(),
        }
    }

    /// 新建实体：校验权限和必填字段后写入集合，失败时集合不变
    /// Create an entity from a draft. On failure nothing is written and the
    /// session receives the matching notification.
    pub fn create<D: EntityDraft>(
        &mut self,
        session: &mut SessionContext,
        draft: D,
    ) -> AppResult<D::Entity> {
        let user = session.require_roles(D::ALLOWED_ROLES, D::DENIED)?;

        if let Err(error) = draft.validate() {
            if let Some(notification) = error.notification() {
                session.notify(notification);
            }
            return Err(error);
        }

        let entity = draft.build(uuid::Uuid::new_v4().to_string(), &user)?;
        let collection = D::collection(self);
        if D::PREPEND {
            collection.insert(0, entity.clone());
        } else {
            collection.push(entity.clone());
        }

        tracing::info!(client = %session.client_id(), entity = D::ENTITY, "entity created");
        session.notify(D::created());
        Ok(entity)
    }
}

/// 新建表单
pub trait EntityDraft: Sized {
    type Entity: Clone;

    const ENTITY: &'static str;
    const ALLOWED_ROLES: &'static [Role];
    const DENIED: &'static str;
    const PREPEND: bool = false;

    fn validate(&self) -> AppResult<()>;

    fn build(self, id: String, author: &User) -> AppResult<Self::Entity>;

    fn collection(workspace: &mut Workspace) -> &mut Vec<Self::Entity>;

    fn created() -> Notification;
}

fn require(fields: &[(&str, &str)], message: &str) -> AppResult<()> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(AppError::validation(*field, message)),
        None => Ok(()),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl EntityDraft for NoticeDraft {
    type Entity = Notice;

    const ENTITY: &'static str = "notice";
    const ALLOWED_ROLES: &'static [Role] = &[Role::Admin];
    const DENIED: &'static str = "Only administrators can add notices.";
    const PREPEND: bool = true;

    fn validate(&self) -> AppResult<()> {
        require(
            &[("title", self.title.as_str()), ("content", self.content.as_str())],
            "Please provide both title and content for the notice.",
        )
    }

    fn build(self, id: String, author: &User) -> AppResult<Notice> {
        Ok(Notice {
            id,
            title: self.title,
            content: self.content,
            file_url: non_empty(self.file_url),
            posted_by: author.id.clone(),
            posted_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            expiry_date: non_empty(self.expiry_date),
        })
    }

    fn collection(workspace: &mut Workspace) -> &mut Vec<Notice> {
        &mut workspace.notices
    }

    fn created() -> Notification {
        Notification::info("Notice Added", "Your notice has been published successfully.")
    }
}

impl EntityDraft for HolidayDraft {
    type Entity = Holiday;

    const ENTITY: &'static str = "holiday";
    const ALLOWED_ROLES: &'static [Role] = &[Role::Admin];
    const DENIED: &'static str = "Only administrators can add holidays.";

    fn validate(&self) -> AppResult<()> {
        require(
            &[("title", self.title.as_str()), ("date", self.date.as_str())],
            "Please provide both name and date for the holiday.",
        )
    }

    fn build(self, id: String, _author: &User) -> AppResult<Holiday> {
        Ok(Holiday {
            id,
            title: self.title,
            description: Some(self.description),
            date: self.date,
        })
    }

    fn collection(workspace: &mut Workspace) -> &mut Vec<Holiday> {
        &mut workspace.holidays
    }

    fn created() -> Notification {
        Notification::info("Holiday Added", "The holiday has been added successfully.")
    }
}

impl EntityDraft for ExamDraft {
    type Entity = ExamSchedule;

    const ENTITY: &'static str = "exam";
    const ALLOWED_ROLES: &'static [Role] = &[Role::Admin, Role::Teacher];
    const DENIED: &'static str = "Only administrators and teachers can add exam schedules.";

    fn validate(&self) -> AppResult<()> {
        require(
            &[
                ("subject", self.subject.as_str()),
                ("date", self.date.as_str()),
                ("time", self.time.as_str()),
                ("room", self.room.as_str()),
            ],
            "Please fill in all required fields.",
        )
    }

    fn build(self, id: String, author: &User) -> AppResult<ExamSchedule> {
        Ok(ExamSchedule {
            id,
            subject: self.subject,
            exam_type: non_empty(self.exam_type).unwrap_or_else(|| DEFAULT_EXAM_TYPE.to_string()),
            date: self.date,
            time: self.time,
            room: self.room,
            created_by: author.id.clone(),
        })
    }

    fn collection(workspace: &mut Workspace) -> &mut Vec<ExamSchedule> {
        &mut workspace.exams
    }

    fn created() -> Notification {
        Notification::info("Exam Added", "The exam schedule has been added successfully.")
    }
}

impl EntityDraft for EventDraft {
    type Entity = CalendarEvent;

    const ENTITY: &'static str = "event";
    const ALLOWED_ROLES: &'static [Role] = &[Role::Admin];
    const DENIED: &'static str = "Only administrators can add events.";

    fn validate(&self) -> AppResult<()> {
        require(
            &[
                ("title", self.title.as_str()),
                ("startDate", self.start_date.as_str()),
                ("eventType", self.event_type.as_str()),
            ],
            "Please fill in all required fields.",
        )?;
        self.event_type
            .parse::<EventType>()
            .map(|_| ())
            .map_err(|message| AppError::validation("eventType", message))
    }

    fn build(self, id: String, author: &User) -> AppResult<CalendarEvent> {
        let event_type = self
            .event_type
            .parse::<EventType>()
            .map_err(|message| AppError::validation("eventType", message))?;
        let end_date = non_empty(self.end_date).unwrap_or_else(|| self.start_date.clone());

        Ok(CalendarEvent {
            id,
            title: self.title,
            description: non_empty(self.description),
            event_type,
            start_date: self.start_date,
            end_date,
            created_by: author.id.clone(),
        })
    }

    fn collection(workspace: &mut Workspace) -> &mut Vec<CalendarEvent> {
        &mut workspace.events
    }

    fn created() -> Notification {
        Notification::info(
            "Event Added",
            "The event has been added to the calendar successfully.",
        )
    }
}
