use actix_web::{
    http::{header, StatusCode},
    test, web, App,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use academic_portal::configure_portal;
use academic_portal::middleware::RouteGuardMiddleware;
use academic_portal::modules::auth::extract::SESSION_HEADER;
use academic_portal::modules::auth::session::SessionSettings;
use academic_portal::modules::auth::storage::{MemoryStorage, SessionStorage};
use academic_portal::modules::base::state::PortalState;
use academic_portal::modules::functions::db_test::DbProbe;

fn portal_state() -> web::Data<PortalState> {
    let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
    web::Data::new(PortalState::new(storage, SessionSettings::new(Duration::ZERO)))
}

fn unreachable_probe() -> web::Data<DbProbe> {
    let mut probe = DbProbe::with_url("postgres://user:pw@127.0.0.1:1/db");
    probe.connect_timeout = Duration::from_secs(2);
    web::Data::new(probe)
}

macro_rules! portal {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RouteGuardMiddleware::new())
                .app_data($state)
                .app_data(unreachable_probe())
                .configure(configure_portal),
        )
        .await
    };
}

macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn as_client(req: test::TestRequest, client: &str) -> test::TestRequest {
    req.insert_header((SESSION_HEADER, client.to_string()))
}

#[actix_web::test]
async fn test_login_and_logout_flow() {
    let app = portal!(portal_state());

    let (status, body) = call_json!(
        app,
        as_client(test::TestRequest::post().uri("/api/auth/login"), "c1")
            .set_json(json!({ "email": "teacher@academy.edu", "password": "password" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "teacher");
    assert_eq!(body["data"]["clientId"], "c1");
    assert_eq!(body["notifications"][0]["title"], "Login Successful");
    assert_eq!(body["notifications"][0]["description"], "Welcome back, Teacher Smith!");

    let (_, body) = call_json!(app, as_client(test::TestRequest::get().uri("/api/auth/me"), "c1"));
    assert_eq!(body["data"]["authenticated"], true);

    let (_, body) = call_json!(app, as_client(test::TestRequest::post().uri("/api/auth/logout"), "c1"));
    assert_eq!(body["notifications"][0]["title"], "Logged Out");

    let (_, body) = call_json!(app, as_client(test::TestRequest::get().uri("/api/auth/me"), "c1"));
    assert_eq!(body["data"]["authenticated"], false);
}

#[actix_web::test]
async fn test_bad_credentials() {
    let app = portal!(portal_state());

    let (status, body) = call_json!(
        app,
        as_client(test::TestRequest::post().uri("/api/auth/login"), "c2")
            .set_json(json!({ "email": "admin@academy.edu", "password": "nope" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["notification"]["title"], "Login Failed");
    assert_eq!(body["notification"]["description"], "Invalid email or password.");
    assert_eq!(body["notification"]["variant"], "destructive");
}

#[actix_web::test]
async fn test_api_requires_session() {
    let app = portal!(portal_state());

    let (status, _) = call_json!(app, test::TestRequest::get().uri("/api/events"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_student_cannot_create_notice() {
    let app = portal!(portal_state());
    call_json!(app, as_client(test::TestRequest::post().uri("/api/auth/demo/student"), "s1"));

    let (status, body) = call_json!(
        app,
        as_client(test::TestRequest::post().uri("/api/notices"), "s1")
            .set_json(json!({ "title": "Hi", "content": "There" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["notification"]["description"], "Only administrators can add notices.");

    let (_, body) = call_json!(app, as_client(test::TestRequest::get().uri("/api/notices"), "s1"));
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[actix_web::test]
async fn test_admin_creates_notice_on_top() {
    let app = portal!(portal_state());
    call_json!(app, as_client(test::TestRequest::post().uri("/api/auth/demo/admin"), "a1"));

    let (status, body) = call_json!(
        app,
        as_client(test::TestRequest::post().uri("/api/notices"), "a1")
            .set_json(json!({ "title": "Lab closed", "content": "Closed on Friday." }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["postedBy"], "1");
    assert_eq!(body["notifications"][0]["title"], "Notice Added");

    let (_, body) = call_json!(app, as_client(test::TestRequest::get().uri("/api/notices"), "a1"));
    let notices = body["data"].as_array().unwrap();
    assert_eq!(notices.len(), 6);
    assert_eq!(notices[0]["title"], "Lab closed");
    assert_eq!(notices[0]["isNew"], true);
}

#[actix_web::test]
async fn test_missing_fields_leave_collection_unchanged() {
    let app = portal!(portal_state());
    call_json!(app, as_client(test::TestRequest::post().uri("/api/auth/demo/teacher"), "t1"));

    let (status, body) = call_json!(
        app,
        as_client(test::TestRequest::post().uri("/api/exams"), "t1")
            .set_json(json!({ "subject": "Chemistry", "date": "2025-06-01" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["notification"]["title"], "Missing Information");

    let (_, body) = call_json!(app, as_client(test::TestRequest::get().uri("/api/exams"), "t1"));
    assert_eq!(body["data"]["exams"].as_array().unwrap().len(), 6);
}

#[actix_web::test]
async fn test_workspaces_are_per_client_and_reset_on_login() {
    let app = portal!(portal_state());
    for client in ["a1", "a2"] {
        call_json!(app, as_client(test::TestRequest::post().uri("/api/auth/demo/admin"), client));
    }

    let (status, _) = call_json!(
        app,
        as_client(test::TestRequest::post().uri("/api/holidays"), "a1")
            .set_json(json!({ "title": "Founders Day", "date": "2025-09-01", "description": "" }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let count = |body: &Value| -> usize {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|group| group["holidays"].as_array().unwrap().len())
            .sum()
    };

    let (_, body) = call_json!(app, as_client(test::TestRequest::get().uri("/api/holidays"), "a1"));
    assert_eq!(count(&body), 6);
    let (_, body) = call_json!(app, as_client(test::TestRequest::get().uri("/api/holidays"), "a2"));
    assert_eq!(count(&body), 5);

    call_json!(app, as_client(test::TestRequest::post().uri("/api/auth/demo/admin"), "a1"));
    let (_, body) = call_json!(app, as_client(test::TestRequest::get().uri("/api/holidays"), "a1"));
    assert_eq!(count(&body), 5);
}

#[actix_web::test]
async fn test_event_search_and_type_filter() {
    let app = portal!(portal_state());
    call_json!(app, as_client(test::TestRequest::post().uri("/api/auth/demo/student"), "s1"));

    let (_, body) = call_json!(
        app,
        as_client(test::TestRequest::get().uri("/api/events?search=EXAM"), "s1")
    );
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|event| event["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Midterm Examinations", "Final Examinations"]);

    let (_, body) = call_json!(
        app,
        as_client(test::TestRequest::get().uri("/api/events?types=seminar"), "s1")
    );
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_day_lookups_apply_type_filter() {
    let app = portal!(portal_state());
    call_json!(app, as_client(test::TestRequest::post().uri("/api/auth/demo/student"), "s1"));

    let titles = |events: &Value| -> Vec<String> {
        events
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|event| event["title"].as_str().map(str::to_string))
            .collect()
    };

    let (_, body) = call_json!(
        app,
        as_client(test::TestRequest::get().uri("/api/events/day/2025-03-16"), "s1")
    );
    assert_eq!(titles(&body["data"]), vec!["Spring Break"]);

    let (status, body) = call_json!(
        app,
        as_client(test::TestRequest::get().uri("/api/events/day/2025-03-16?types=exam"), "s1")
    );
    assert_eq!(status, StatusCode::OK);
    assert!(titles(&body["data"]).is_empty());

    let (_, body) = call_json!(
        app,
        as_client(
            test::TestRequest::get().uri("/api/calendar/view?view=day&date=2025-03-16&types=exam"),
            "s1"
        )
    );
    assert!(titles(&body["data"]["days"][0]["events"]).is_empty());

    let (_, body) = call_json!(
        app,
        as_client(
            test::TestRequest::get().uri("/api/calendar/view?view=day&date=2025-03-16"),
            "s1"
        )
    );
    assert_eq!(titles(&body["data"]["days"][0]["events"]), vec!["Spring Break"]);
}

#[actix_web::test]
async fn test_settings_admin_only() {
    let app = portal!(portal_state());
    call_json!(app, as_client(test::TestRequest::post().uri("/api/auth/demo/teacher"), "t1"));
    call_json!(app, as_client(test::TestRequest::post().uri("/api/auth/demo/admin"), "a1"));

    let (status, body) = call_json!(app, as_client(test::TestRequest::get().uri("/api/settings"), "t1"));
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["notification"]["description"], "Only administrators can change settings.");

    let (status, body) = call_json!(
        app,
        as_client(test::TestRequest::post().uri("/api/settings/event-types"), "a1")
            .set_json(json!({ "name": "Sports Day" }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "sports-day");

    let (status, body) = call_json!(
        app,
        as_client(test::TestRequest::post().uri("/api/settings/event-types"), "a1")
            .set_json(json!({ "name": "Sports Day" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "This event type already exists");
    assert_eq!(body["notification"]["title"], "Error");
}

#[actix_web::test]
async fn test_page_guard_redirects() {
    let app = portal!(portal_state());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/dashboard");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/exams").to_request()).await;
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/missing-page"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["content"]["message"], "Oops! Page not found");
}

#[actix_web::test]
async fn test_page_guard_covers_every_method() {
    let app = portal!(portal_state());
    call_json!(app, as_client(test::TestRequest::post().uri("/api/auth/demo/teacher"), "t1"));

    let resp = test::call_service(
        &app,
        as_client(test::TestRequest::post().uri("/settings"), "t1").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/dashboard");

    let resp = test::call_service(&app, test::TestRequest::post().uri("/calendar").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");

    let resp = test::call_service(&app, test::TestRequest::delete().uri("/dashboard").to_request()).await;
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}

#[actix_web::test]
async fn test_functions_bypass_session() {
    let app = portal!(portal_state());

    let (status, body) = call_json!(app, test::TestRequest::post().uri("/functions/hello-world"));
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/functions/db-test"));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database connection failed");
    assert!(body["message"].is_string());

    let (status, _) = call_json!(app, test::TestRequest::get().uri("/api-doc/openapi.json"));
    assert_eq!(status, StatusCode::OK);
}
