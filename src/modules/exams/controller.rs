use actix_web::{web, HttpResponse};

use crate::error::{ApiResponse, AppResult};
use crate::modules::auth::extract::ClientSession;
use crate::modules::base::state::PortalState;
use crate::modules::exams::models::{ExamDraft, ExamListing, ExamQuery};
use crate::modules::exams::view::{exam_listing, ALL_TYPES};

/// 考试安排
#[utoipa::path(
    get,
    path = "/api/exams",
    params(ExamQuery),
    responses((status = 200, description = "Exams sorted by date", body = ExamListing))
)]
#[actix_web::get("/api/exams")]
pub async fn list(
    state: web::Data<PortalState>,
    client: ClientSession,
    query: web::Query<ExamQuery>,
) -> AppResult<web::Json<ApiResponse<ExamListing>>> {
    client.session.require_user()?;

    let search = query.search.as_deref().unwrap_or("");
    let exam_type = query.exam_type.as_deref().unwrap_or(ALL_TYPES);
    let listing = state.read_workspace(&client.client_id, |workspace| {
        exam_listing(&workspace.exams, search, exam_type)
    });
    crate::api_success!(listing)
}

/// 新建考试安排（管理员、教师）
#[utoipa::path(
    post,
    path = "/api/exams",
    request_body = ExamDraft,
    responses((status = 201, description = "Exam added"), (status = 403, description = "Students cannot add exams"))
)]
#[actix_web::post("/api/exams")]
pub async fn create(
    state: web::Data<PortalState>,
    client: ClientSession,
    draft: web::Json<ExamDraft>,
) -> AppResult<HttpResponse> {
    let ClientSession {
        client_id,
        mut session,
        ..
    } = client;

    let exam = state.with_workspace(&client_id, |workspace| {
        workspace.create(&mut session, draft.into_inner())
    })?;
    Ok(HttpResponse::Created()
        .json(ApiResponse::success(exam).with_notifications(session.take_notifications())))
}

pub fn configure_exam_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list).service(create);
}
