use actix_web::web;

use crate::error::{ApiResponse, AppResult};
use crate::modules::auth::extract::ClientSession;
use crate::modules::base::state::PortalState;
use crate::modules::dashboard::view::{dashboard_summary, navigation_for, DashboardSummary, Navigation};

/// 首页汇总
#[utoipa::path(get, path = "/api/dashboard", responses((status = 200, description = "Dashboard summary", body = DashboardSummary)))]
#[actix_web::get("/api/dashboard")]
pub async fn summary(
    state: web::Data<PortalState>,
    client: ClientSession,
) -> AppResult<web::Json<ApiResponse<DashboardSummary>>> {
    client.session.require_user()?;
    let summary = state.read_workspace(&client.client_id, dashboard_summary);
    crate::api_success!(summary)
}

/// 导航菜单
#[utoipa::path(get, path = "/api/navigation", responses((status = 200, description = "Menu for the current role", body = Navigation)))]
#[actix_web::get("/api/navigation")]
pub async fn navigation(client: ClientSession) -> AppResult<web::Json<ApiResponse<Navigation>>> {
    let user = client.session.require_user()?;
    crate::api_success!(navigation_for(user))
}

pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(summary).service(navigation);
}
