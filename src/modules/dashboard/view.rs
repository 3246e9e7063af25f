//! 首页汇总与导航
//! Dashboard summary and the role-aware navigation menu.

use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::auth::models::{role_allows, Role, User};
use crate::modules::base::workspace::Workspace;
use crate::modules::calendar::models::{CalendarEvent, EventType};
use crate::modules::calendar::view::{count_by_type, sort_by_start};
use crate::modules::exams::models::ExamSchedule;
use crate::modules::notices::models::Notice;

pub const RECENT_NOTICES: usize = 3;
pub const UPCOMING_EVENTS: usize = 3;
pub const DASHBOARD_EXAMS: usize = 4;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeCount {
    pub event_type: EventType,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub event_counts: Vec<EventTypeCount>,
    pub recent_notices: Vec<Notice>,
    pub upcoming_events: Vec<CalendarEvent>,
    pub exams: Vec<ExamSchedule>,
}

pub fn dashboard_summary(workspace: &Workspace) -> DashboardSummary {
    let mut upcoming = workspace.events.clone();
    sort_by_start(&mut upcoming);
    upcoming.truncate(UPCOMING_EVENTS);

    DashboardSummary {
        event_counts: count_by_type(&workspace.events)
            .into_iter()
            .map(|(event_type, count)| EventTypeCount {
                event_type,
                label: event_type.label().to_string(),
                count,
            })
            .collect(),
        recent_notices: workspace.notices.iter().take(RECENT_NOTICES).cloned().collect(),
        upcoming_events: upcoming,
        exams: workspace.exams.iter().take(DASHBOARD_EXAMS).cloned().collect(),
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NavItem {
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Navigation {
    pub items: Vec<NavItem>,
    pub user: User,
}

const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// 菜单项及可见角色（None 表示所有已登录用户）
const MENU: [(&str, &str, Option<&[Role]>); 6] = [
    ("Dashboard", "/dashboard", None),
    ("Calendar", "/calendar", None),
    ("Notice Board", "/notices", None),
    ("Exam Schedule", "/exams", None),
    ("Holidays", "/holidays", None),
    ("Settings", "/settings", Some(ADMIN_ONLY)),
];

pub fn navigation_for(user: &User) -> Navigation {
    let items = MENU
        .iter()
        .filter(|(_, _, roles)| roles.map_or(true, |roles| role_allows(user.role, roles)))
        .map(|(title, path, _)| NavItem {
            title: title.to_string(),
            path: path.to_string(),
        })
        .collect();

    Navigation {
        items,
        user: user.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::base::seed::first_user_with_role;

    #[test]
    fn test_summary_of_seed_workspace() {
        let summary = dashboard_summary(&Workspace::seeded());

        let counts: Vec<usize> = summary.event_counts.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![1, 2, 1, 2]);
        assert_eq!(summary.event_counts[3].label, "Seminar");

        let notices: Vec<&str> = summary.recent_notices.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(notices, vec!["1", "2", "3"]);

        let upcoming: Vec<&str> = summary.upcoming_events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(upcoming, vec!["2", "1", "4"]);
        assert_eq!(summary.exams.len(), 4);
    }

    #[test]
    fn test_empty_workspace() {
        let summary = dashboard_summary(&Workspace::default());
        assert!(summary.recent_notices.is_empty());
        assert!(summary.event_counts.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_settings_only_for_admin() {
        let admin = navigation_for(first_user_with_role(Role::Admin).unwrap());
        assert_eq!(admin.items.len(), 6);
        assert_eq!(admin.items[5].path, "/settings");

        for role in [Role::Teacher, Role::Student] {
            let nav = navigation_for(first_user_with_role(role).unwrap());
            assert_eq!(nav.items.len(), 5);
            assert!(nav.items.iter().all(|item| item.path != "/settings"));
        }
    }
}
