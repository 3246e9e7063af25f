//! 页面守卫中间件
//! Runs the page access decision for GET requests outside the API prefixes and
//! answers redirects with `302 Found` + `Location`.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header, Method},
    web, Error, HttpResponse,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use tracing::debug;

use crate::modules::auth::extract::client_id_from;
use crate::modules::auth::guard::GuardDecision;
use crate::modules::base::pages::{navigate, ClientRoute};
use crate::modules::base::state::PortalState;

/// 不经过页面守卫的路径前缀
const PASS_THROUGH: [&str; 3] = ["/api/", "/api-doc/", "/functions/"];

pub struct RouteGuardMiddleware;

impl RouteGuardMiddleware {
    pub fn new() -> Self {
        Self
    }

    fn is_page_request(req: &ServiceRequest) -> bool {
        (req.method() == Method::GET || req.method() == Method::HEAD)
            && !PASS_THROUGH.iter().any(|prefix| req.path().starts_with(prefix))
    }
}

impl Default for RouteGuardMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for RouteGuardMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RouteGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteGuardService {
            service: Rc::new(service),
        }))
    }
}

pub struct RouteGuardService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RouteGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            if RouteGuardMiddleware::is_page_request(&req) {
                let route = ClientRoute::resolve(req.path());
                let user = match (
                    req.app_data::<web::Data<PortalState>>(),
                    client_id_from(req.request()),
                ) {
                    (Some(state), Some(client_id)) => state.session(&client_id).current_user().cloned(),
                    _ => None,
                };

                if let GuardDecision::Redirect(location) = navigate(route, user.as_ref()) {
                    debug!(path = req.path(), location, "page redirect");
                    let response = HttpResponse::Found()
                        .insert_header((header::LOCATION, location))
                        .finish();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            let response = service.call(req).await?;
            Ok(response.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::extract::SESSION_HEADER;
    use crate::modules::auth::session::SessionSettings;
    use crate::modules::auth::storage::{MemoryStorage, SessionStorage};
    use crate::modules::base::pages::configure_page_routes;
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;
    use std::time::Duration;

    async fn state_with_teacher() -> web::Data<PortalState> {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        let state = PortalState::new(storage, SessionSettings::new(Duration::ZERO));
        state
            .session("teacher-client")
            .login("teacher@academy.edu", "password")
            .await
            .unwrap();
        web::Data::new(state)
    }

    #[actix_web::test]
    async fn test_redirects_follow_guard() {
        let state = state_with_teacher().await;
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .wrap(RouteGuardMiddleware::new())
                .configure(configure_page_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/calendar").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");

        let req = test::TestRequest::get()
            .uri("/settings")
            .insert_header((SESSION_HEADER, "teacher-client"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/dashboard");

        let req = test::TestRequest::get()
            .uri("/calendar")
            .insert_header((SESSION_HEADER, "teacher-client"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_api_paths_pass_through() {
        let app = test::init_service(
            App::new()
                .wrap(RouteGuardMiddleware::new())
                .route("/api/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/ping").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
