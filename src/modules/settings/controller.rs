use actix_web::{web, HttpResponse};

use crate::comm::Notification;
use crate::error::{ApiResponse, AppError, AppResult};
use crate::modules::auth::extract::ClientSession;
use crate::modules::auth::models::Role;
use crate::modules::base::state::PortalState;
use crate::modules::settings::models::{
    EventTypeEntry, EventTypeUpdate, NewEventType, PortalSettings, SettingsSection,
};

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const DENIED: &str = "Only administrators can change settings.";

/// 全部设置（管理员）
#[utoipa::path(get, path = "/api/settings", responses((status = 200, description = "Portal settings", body = PortalSettings)))]
#[actix_web::get("/api/settings")]
pub async fn get_settings(
    state: web::Data<PortalState>,
    mut client: ClientSession,
) -> AppResult<web::Json<ApiResponse<PortalSettings>>> {
    client.session.require_roles(ADMIN_ONLY, DENIED)?;
    crate::api_success!(state.settings())
}

/// 保存设置分区
#[utoipa::path(
    post,
    path = "/api/settings/{section}",
    params(("section" = String, Path, description = "general, notifications or permissions")),
    responses((status = 200, description = "Section saved", body = PortalSettings))
)]
#[actix_web::post("/api/settings/{section}")]
pub async fn save_section(
    state: web::Data<PortalState>,
    mut client: ClientSession,
    section: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> AppResult<web::Json<ApiResponse<PortalSettings>>> {
    client.session.require_roles(ADMIN_ONLY, DENIED)?;

    let section: SettingsSection = section
        .parse()
        .map_err(|_| AppError::not_found(format!("settings section {}", section.as_str())))?;
    let saved = state.with_settings(|settings| {
        settings
            .save_section(section, body.into_inner())
            .map(|toast| (toast, settings.clone()))
    })?;

    let (toast, settings) = saved;
    crate::api_success!(settings, vec![toast])
}

/// 新增事件类型
#[utoipa::path(
    post,
    path = "/api/settings/event-types",
    request_body = NewEventType,
    responses((status = 201, description = "Event type added", body = EventTypeEntry))
)]
#[actix_web::post("/api/settings/event-types")]
pub async fn add_event_type(
    state: web::Data<PortalState>,
    mut client: ClientSession,
    request: web::Json<NewEventType>,
) -> AppResult<HttpResponse> {
    client.session.require_roles(ADMIN_ONLY, DENIED)?;

    let entry = state.with_settings(|settings| settings.add_event_type(request.into_inner()))?;
    Ok(HttpResponse::Created().json(
        ApiResponse::success(entry).with_notifications(vec![Notification::info(
            "Success",
            "New event type added",
        )]),
    ))
}

/// 修改事件类型
#[utoipa::path(
    put,
    path = "/api/settings/event-types/{id}",
    params(("id" = String, Path, description = "Event type id")),
    request_body = EventTypeUpdate,
    responses((status = 200, description = "Event type updated", body = EventTypeEntry))
)]
#[actix_web::put("/api/settings/event-types/{id}")]
pub async fn update_event_type(
    state: web::Data<PortalState>,
    mut client: ClientSession,
    id: web::Path<String>,
    update: web::Json<EventTypeUpdate>,
) -> AppResult<web::Json<ApiResponse<EventTypeEntry>>> {
    client.session.require_roles(ADMIN_ONLY, DENIED)?;

    let entry = state.with_settings(|settings| settings.update_event_type(&id, update.into_inner()))?;
    crate::api_success!(
        entry,
        vec![Notification::info("Success", "Event type updated successfully")]
    )
}

pub fn configure_settings_routes(cfg: &mut web::ServiceConfig) {
    // 固定路径需在 `{section}` 之前注册
    cfg.service(add_event_type)
        .service(update_event_type)
        .service(get_settings)
        .service(save_section);
}
