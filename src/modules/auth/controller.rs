use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ApiResponse, AppResult};
use crate::modules::auth::extract::{removal_cookie, session_cookie, ClientSession};
use crate::modules::auth::models::{LoginRequest, Role, User};
use crate::modules::base::state::PortalState;

/// 登录响应
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    /// Send back as the `portal_sid` cookie or the `X-Portal-Session` header.
    pub client_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub authenticated: bool,
    pub user: Option<User>,
}

/// 登录
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses((status = 200, description = "Logged in"), (status = 401, description = "Invalid email or password"))
)]
#[actix_web::post("/api/auth/login")]
pub async fn login(
    state: web::Data<PortalState>,
    client: ClientSession,
    req: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let ClientSession {
        client_id,
        mut session,
        ..
    } = client;

    let user = session.login(&req.email, &req.password).await?;
    state.invalidate_workspace(&client_id);

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&client_id))
        .json(
            ApiResponse::success(LoginResponse { user, client_id })
                .with_notifications(session.take_notifications()),
        ))
}

/// 演示账号登录
#[utoipa::path(
    post,
    path = "/api/auth/demo/{role}",
    params(("role" = Role, Path, description = "admin, teacher or student")),
    responses((status = 200, description = "Logged in as the demo account"))
)]
#[actix_web::post("/api/auth/demo/{role}")]
pub async fn demo_login(
    state: web::Data<PortalState>,
    client: ClientSession,
    role: web::Path<Role>,
) -> AppResult<HttpResponse> {
    let ClientSession {
        client_id,
        mut session,
        ..
    } = client;

    let user = session.login_as(role.into_inner()).await?;
    state.invalidate_workspace(&client_id);

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&client_id))
        .json(
            ApiResponse::success(LoginResponse { user, client_id })
                .with_notifications(session.take_notifications()),
        ))
}

/// 注销
#[utoipa::path(post, path = "/api/auth/logout", responses((status = 200, description = "Logged out")))]
#[actix_web::post("/api/auth/logout")]
pub async fn logout(state: web::Data<PortalState>, client: ClientSession) -> AppResult<HttpResponse> {
    let ClientSession {
        client_id,
        mut session,
        ..
    } = client;

    session.logout().await?;
    state.invalidate_workspace(&client_id);

    Ok(HttpResponse::Ok().cookie(removal_cookie()).json(
        ApiResponse::success(CurrentUser {
            authenticated: false,
            user: None,
        })
        .with_notifications(session.take_notifications()),
    ))
}

/// 当前用户
#[utoipa::path(get, path = "/api/auth/me", responses((status = 200, description = "Current session")))]
#[actix_web::get("/api/auth/me")]
pub async fn me(client: ClientSession) -> AppResult<web::Json<ApiResponse<CurrentUser>>> {
    let user = client.session.current_user().cloned();
    crate::api_success!(CurrentUser {
        authenticated: user.is_some(),
        user,
    })
}

pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(demo_login)
        .service(logout)
        .service(me);
}
