//! 客户端身份
//! The client id travels in the `portal_sid` cookie or the `X-Portal-Session` header.

use actix_web::cookie::Cookie;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::modules::auth::session::SessionContext;
use crate::modules::base::state::PortalState;

pub const SESSION_COOKIE: &str = "portal_sid";
pub const SESSION_HEADER: &str = "X-Portal-Session";

/// 从 cookie 或请求头读取客户端 id
pub fn client_id_from(req: &HttpRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    from_header.or_else(|| {
        req.cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    })
}

pub fn session_cookie(client_id: &str) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, client_id.to_string())
        .path("/")
        .http_only(true)
        .finish()
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// 请求级会话；没有客户端 id 时分配新的 id
pub struct ClientSession {
    pub client_id: String,
    pub session: SessionContext,
    /// True when the id was generated for this request and still has to be set as a cookie.
    pub issued: bool,
}

impl FromRequest for ClientSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<PortalState>>() else {
            return ready(Err(AppError::Internal(anyhow::anyhow!(
                "portal state is not registered"
            ))));
        };

        let (client_id, issued) = match client_id_from(req) {
            Some(id) => (id, false),
            None => (uuid::Uuid::new_v4().to_string(), true),
        };

        ready(Ok(ClientSession {
            session: state.session(&client_id),
            client_id,
            issued,
        }))
    }
}
