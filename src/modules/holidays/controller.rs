use actix_web::{web, HttpResponse};

use crate::error::{ApiResponse, AppResult};
use crate::modules::auth::extract::ClientSession;
use crate::modules::base::state::PortalState;
use crate::modules::holidays::models::{HolidayDraft, HolidayGroup, HolidayQuery};
use crate::modules::holidays::view::grouped_holidays;

/// 节假日，按月份分组
#[utoipa::path(
    get,
    path = "/api/holidays",
    params(HolidayQuery),
    responses((status = 200, description = "Holidays grouped by month", body = [HolidayGroup]))
)]
#[actix_web::get("/api/holidays")]
pub async fn list(
    state: web::Data<PortalState>,
    client: ClientSession,
    query: web::Query<HolidayQuery>,
) -> AppResult<web::Json<ApiResponse<Vec<HolidayGroup>>>> {
    client.session.require_user()?;

    let search = query.search.as_deref().unwrap_or("");
    let groups = state.read_workspace(&client.client_id, |workspace| {
        grouped_holidays(&workspace.holidays, search)
    });
    crate::api_success!(groups)
}

/// 新建节假日（管理员）
#[utoipa::path(
    post,
    path = "/api/holidays",
    request_body = HolidayDraft,
    responses((status = 201, description = "Holiday added"), (status = 403, description = "Not an administrator"))
)]
#[actix_web::post("/api/holidays")]
pub async fn create(
    state: web::Data<PortalState>,
    client: ClientSession,
    draft: web::Json<HolidayDraft>,
) -> AppResult<HttpResponse> {
    let ClientSession {
        client_id,
        mut session,
        ..
    } = client;

    let holiday = state.with_workspace(&client_id, |workspace| {
        workspace.create(&mut session, draft.into_inner())
    })?;
    Ok(HttpResponse::Created()
        .json(ApiResponse::success(holiday).with_notifications(session.take_notifications())))
}

pub fn configure_holiday_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list).service(create);
}
