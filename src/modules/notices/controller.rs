use actix_web::{web, HttpResponse};
use chrono::Local;

use crate::error::{ApiResponse, AppResult};
use crate::modules::auth::extract::ClientSession;
use crate::modules::base::state::PortalState;
use crate::modules::notices::models::{NoticeDraft, NoticeEntry, NoticeQuery};
use crate::modules::notices::view::list_notices;

/// 公告列表
#[utoipa::path(
    get,
    path = "/api/notices",
    params(NoticeQuery),
    responses((status = 200, description = "Notices, newest first by default", body = [NoticeEntry]))
)]
#[actix_web::get("/api/notices")]
pub async fn list(
    state: web::Data<PortalState>,
    client: ClientSession,
    query: web::Query<NoticeQuery>,
) -> AppResult<web::Json<ApiResponse<Vec<NoticeEntry>>>> {
    client.session.require_user()?;

    let search = query.search.as_deref().unwrap_or("");
    let sort = query.sort.unwrap_or_default();
    let now = Local::now().naive_local();
    let notices = state.read_workspace(&client.client_id, |workspace| {
        list_notices(&workspace.notices, search, sort, now)
    });
    crate::api_success!(notices)
}

/// 发布公告（管理员）
#[utoipa::path(
    post,
    path = "/api/notices",
    request_body = NoticeDraft,
    responses((status = 201, description = "Notice published"), (status = 400, description = "Title or content missing"))
)]
#[actix_web::post("/api/notices")]
pub async fn create(
    state: web::Data<PortalState>,
    client: ClientSession,
    draft: web::Json<NoticeDraft>,
) -> AppResult<HttpResponse> {
    let ClientSession {
        client_id,
        mut session,
        ..
    } = client;

    let notice = state.with_workspace(&client_id, |workspace| {
        workspace.create(&mut session, draft.into_inner())
    })?;
    Ok(HttpResponse::Created()
        .json(ApiResponse::success(notice).with_notifications(session.take_notifications())))
}

pub fn configure_notice_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list).service(create);
}
