use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

pub const OPENAPI_PATH: &str = "/api-doc/openapi.json";

/// OpenAPI 文档聚合
#[derive(OpenApi)]
#[openapi(
    info(title = "Campus Connect", description = "学术门户接口 / academic portal API"),
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::demo_login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::me,
        crate::modules::dashboard::controller::summary,
        crate::modules::dashboard::controller::navigation,
        crate::modules::calendar::controller::list_events,
        crate::modules::calendar::controller::create_event,
        crate::modules::calendar::controller::events_on_day,
        crate::modules::calendar::controller::calendar_view,
        crate::modules::notices::controller::list,
        crate::modules::notices::controller::create,
        crate::modules::exams::controller::list,
        crate::modules::exams::controller::create,
        crate::modules::holidays::controller::list,
        crate::modules::holidays::controller::create,
        crate::modules::settings::controller::get_settings,
        crate::modules::settings::controller::save_section,
        crate::modules::settings::controller::add_event_type,
        crate::modules::settings::controller::update_event_type,
        crate::modules::functions::hello_world::hello_world,
        crate::modules::functions::db_test::db_test,
    ),
    components(
        schemas(
            crate::modules::auth::models::Role,
            crate::modules::auth::models::User,
            crate::modules::auth::models::LoginRequest,
            crate::modules::auth::controller::LoginResponse,
            crate::modules::auth::controller::CurrentUser,
            crate::modules::calendar::models::EventType,
            crate::modules::calendar::models::CalendarEvent,
            crate::modules::notices::models::Notice,
            crate::modules::exams::models::ExamSchedule,
            crate::modules::holidays::models::Holiday,
            crate::modules::settings::models::PortalSettings,
        )
    ),
    tags(
        (name = "Portal", description = "登录、校历、公告、考试、假期与设置")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(OPENAPI_PATH).route(web::get().to(openapi_json)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_portal_paths() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for path in [
            "/api/auth/login",
            "/api/events",
            "/api/settings/event-types/{id}",
            "/functions/db-test",
        ] {
            assert!(paths.contains_key(path), "{}", path);
        }
    }
}
