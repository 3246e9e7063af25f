//! 页面路由
//! Client-side routes rendered as JSON page models. Access decisions are made by
//! `navigate`, which the route guard middleware runs before any page handler.

use actix_web::{
    http::{header, StatusCode},
    web, HttpRequest, HttpResponse,
};
use chrono::Local;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::modules::auth::extract::ClientSession;
use crate::modules::auth::guard::{GuardDecision, RouteGuard, LANDING_PATH};
use crate::modules::auth::models::{role_allows, Role, User};
use crate::modules::auth::session::SessionContext;
use crate::modules::base::seed;
use crate::modules::base::state::PortalState;
use crate::modules::base::workspace::EntityDraft;
use crate::modules::calendar::models::EventDraft;
use crate::modules::calendar::view::{filter_events, EventTypeFilter};
use crate::modules::dashboard::view::{dashboard_summary, navigation_for, Navigation};
use crate::modules::exams::models::{ExamDraft, EXAM_TYPES, TIME_SLOTS};
use crate::modules::exams::view::{exam_listing, ALL_TYPES};
use crate::modules::holidays::models::HolidayDraft;
use crate::modules::holidays::view::grouped_holidays;
use crate::modules::notices::models::{NoticeDraft, NoticeSort};
use crate::modules::notices::view::list_notices;

const ADMIN_ONLY: &[Role] = &[Role::Admin];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRoute {
    Login,
    Root,
    Dashboard,
    Calendar,
    Notices,
    Exams,
    Holidays,
    Settings,
    Profile,
    NotFound,
}

impl ClientRoute {
    pub fn resolve(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/login" => ClientRoute::Login,
            "/" => ClientRoute::Root,
            "/dashboard" => ClientRoute::Dashboard,
            "/calendar" => ClientRoute::Calendar,
            "/notices" => ClientRoute::Notices,
            "/exams" => ClientRoute::Exams,
            "/holidays" => ClientRoute::Holidays,
            "/settings" => ClientRoute::Settings,
            "/profile" => ClientRoute::Profile,
            _ => ClientRoute::NotFound,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ClientRoute::Login => "Login",
            ClientRoute::Root | ClientRoute::Dashboard => "Dashboard",
            ClientRoute::Calendar => "Academic Calendar",
            ClientRoute::Notices => "Notice Board",
            ClientRoute::Exams => "Exam Schedule",
            ClientRoute::Holidays => "Holidays",
            ClientRoute::Settings => "Settings",
            ClientRoute::Profile => "Profile",
            ClientRoute::NotFound => "Not Found",
        }
    }

    /// 受保护页面的守卫；登录页、根路径和 404 页不受保护
    pub fn guard(&self) -> Option<RouteGuard> {
        match self {
            ClientRoute::Login | ClientRoute::Root | ClientRoute::NotFound => None,
            ClientRoute::Settings => Some(RouteGuard::with_roles(ADMIN_ONLY)),
            _ => Some(RouteGuard::authenticated()),
        }
    }
}

/// 页面访问决策
pub fn navigate(route: ClientRoute, user: Option<&User>) -> GuardDecision {
    match route {
        ClientRoute::Root => GuardDecision::Redirect(LANDING_PATH),
        ClientRoute::Login if user.is_some() => GuardDecision::Redirect(LANDING_PATH),
        _ => route
            .guard()
            .map_or(GuardDecision::Render, |guard| guard.decide(user)),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub path: String,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Navigation>,
    pub content: Value,
}

fn can_create<D: EntityDraft>(user: &User) -> bool {
    role_allows(user.role, D::ALLOWED_ROLES)
}

fn page_content(route: ClientRoute, session: &SessionContext, state: &PortalState) -> AppResult<Value> {
    let Some(user) = session.current_user() else {
        return Ok(match route {
            ClientRoute::NotFound => json!({ "message": "Oops! Page not found" }),
            _ => json!({
                "demoAccounts": seed::USERS
                    .iter()
                    .map(|user| json!({ "role": user.role, "email": user.email }))
                    .collect::<Vec<_>>(),
            }),
        });
    };

    let client_id = session.client_id();
    let content = match route {
        ClientRoute::Login | ClientRoute::Root | ClientRoute::Dashboard => {
            serde_json::to_value(state.read_workspace(client_id, dashboard_summary))?
        }
        ClientRoute::Calendar => {
            let events = state.read_workspace(client_id, |workspace| {
                filter_events(&workspace.events, "", &EventTypeFilter::default())
            });
            json!({
                "events": events,
                "eventTypes": state.settings().event_types,
                "canAdd": can_create::<EventDraft>(user),
            })
        }
        ClientRoute::Notices => {
            let now = Local::now().naive_local();
            let notices = state.read_workspace(client_id, |workspace| {
                list_notices(&workspace.notices, "", NoticeSort::Newest, now)
            });
            json!({ "notices": notices, "canAdd": can_create::<NoticeDraft>(user) })
        }
        ClientRoute::Exams => {
            let listing = state.read_workspace(client_id, |workspace| {
                exam_listing(&workspace.exams, "", ALL_TYPES)
            });
            json!({
                "exams": listing.exams,
                "examTypes": listing.exam_types,
                "form": { "examTypes": EXAM_TYPES, "timeSlots": TIME_SLOTS },
                "canAdd": can_create::<ExamDraft>(user),
            })
        }
        ClientRoute::Holidays => {
            let groups = state.read_workspace(client_id, |workspace| {
                grouped_holidays(&workspace.holidays, "")
            });
            json!({ "groups": groups, "canAdd": can_create::<HolidayDraft>(user) })
        }
        ClientRoute::Settings => serde_json::to_value(state.settings())?,
        ClientRoute::Profile => json!({ "user": user }),
        ClientRoute::NotFound => json!({ "message": "Oops! Page not found" }),
    };
    Ok(content)
}

/// 页面处理器，挂在 default service 上
pub async fn render_page(
    req: HttpRequest,
    state: web::Data<PortalState>,
    client: ClientSession,
) -> AppResult<HttpResponse> {
    let route = ClientRoute::resolve(req.path());
    let session = &client.session;

    // 中间件只拦截 GET/HEAD，其他方法在这里同样执行守卫
    if let GuardDecision::Redirect(location) = navigate(route, session.current_user()) {
        return Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, location))
            .finish());
    }

    let status = match route {
        ClientRoute::NotFound => {
            tracing::warn!(path = req.path(), "404: user attempted to access a non-existent route");
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::OK,
    };

    let view = PageView {
        path: req.path().to_string(),
        title: route.title(),
        navigation: session.current_user().map(navigation_for),
        content: page_content(route, session, &state)?,
    };
    Ok(HttpResponse::build(status).json(view))
}

pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::to(render_page));
}
