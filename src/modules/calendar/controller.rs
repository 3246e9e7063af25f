use actix_web::{web, HttpResponse};
use chrono::{Local, NaiveDate};

use crate::comm::date::parse_local_date;
use crate::error::{ApiResponse, AppError, AppResult};
use crate::modules::auth::extract::ClientSession;
use crate::modules::base::state::PortalState;
use crate::modules::calendar::models::{
    CalendarDay, CalendarEvent, CalendarViewQuery, CalendarViewResponse, EventDraft, EventQuery,
    EventTypeQuery,
};
use crate::modules::calendar::view::{days_in_view, events_on, filter_events, step, EventTypeFilter};

fn type_filter(types: Option<&str>) -> EventTypeFilter {
    types.map(EventTypeFilter::from_list).unwrap_or_default()
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    parse_local_date(value)
        .ok_or_else(|| AppError::validation("date", format!("'{}' is not a valid date", value)))
}

/// 事件列表
#[utoipa::path(
    get,
    path = "/api/events",
    params(EventQuery),
    responses((status = 200, description = "Events sorted by start date", body = [CalendarEvent]))
)]
#[actix_web::get("/api/events")]
pub async fn list_events(
    state: web::Data<PortalState>,
    client: ClientSession,
    query: web::Query<EventQuery>,
) -> AppResult<web::Json<ApiResponse<Vec<CalendarEvent>>>> {
    client.session.require_user()?;

    let filter = type_filter(query.types.as_deref());
    let search = query.search.as_deref().unwrap_or("");
    let events = state.read_workspace(&client.client_id, |workspace| {
        filter_events(&workspace.events, search, &filter)
    });
    crate::api_success!(events)
}

/// 新建事件（管理员）
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = EventDraft,
    responses((status = 201, description = "Event added"), (status = 403, description = "Not an administrator"))
)]
#[actix_web::post("/api/events")]
pub async fn create_event(
    state: web::Data<PortalState>,
    client: ClientSession,
    draft: web::Json<EventDraft>,
) -> AppResult<HttpResponse> {
    let ClientSession {
        client_id,
        mut session,
        ..
    } = client;

    let event = state.with_workspace(&client_id, |workspace| {
        workspace.create(&mut session, draft.into_inner())
    })?;
    Ok(HttpResponse::Created()
        .json(ApiResponse::success(event).with_notifications(session.take_notifications())))
}

/// 某一天的事件
#[utoipa::path(
    get,
    path = "/api/events/day/{date}",
    params(("date" = String, Path, description = "YYYY-MM-DD"), EventTypeQuery),
    responses((status = 200, description = "Events running on that day", body = [CalendarEvent]))
)]
#[actix_web::get("/api/events/day/{date}")]
pub async fn events_on_day(
    state: web::Data<PortalState>,
    client: ClientSession,
    date: web::Path<String>,
    query: web::Query<EventTypeQuery>,
) -> AppResult<web::Json<ApiResponse<Vec<CalendarEvent>>>> {
    client.session.require_user()?;

    let day = parse_date(&date)?;
    let filter = type_filter(query.types.as_deref());
    let events = state.read_workspace(&client.client_id, |workspace| {
        events_on(&workspace.events, day, &filter)
    });
    crate::api_success!(events)
}

/// 日/周/月视图
#[utoipa::path(
    get,
    path = "/api/calendar/view",
    params(CalendarViewQuery),
    responses((status = 200, description = "Days in the view with their events", body = CalendarViewResponse))
)]
#[actix_web::get("/api/calendar/view")]
pub async fn calendar_view(
    state: web::Data<PortalState>,
    client: ClientSession,
    query: web::Query<CalendarViewQuery>,
) -> AppResult<web::Json<ApiResponse<CalendarViewResponse>>> {
    client.session.require_user()?;

    let view = query.view.unwrap_or_default();
    let anchor = match query.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => Local::now().date_naive(),
    };
    let filter = type_filter(query.types.as_deref());

    let days = state.read_workspace(&client.client_id, |workspace| {
        days_in_view(view, anchor)
            .into_iter()
            .map(|day| CalendarDay {
                date: day.format("%Y-%m-%d").to_string(),
                events: events_on(&workspace.events, day, &filter),
            })
            .collect()
    });

    crate::api_success!(CalendarViewResponse {
        view,
        anchor: anchor.format("%Y-%m-%d").to_string(),
        previous: step(view, anchor, false).format("%Y-%m-%d").to_string(),
        next: step(view, anchor, true).format("%Y-%m-%d").to_string(),
        days,
    })
}

pub fn configure_calendar_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(events_on_day)
        .service(list_events)
        .service(create_event)
        .service(calendar_view);
}
