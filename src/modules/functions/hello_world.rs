use actix_web::HttpResponse;
use serde_json::json;

pub const GREETING: &str = "Hello from the Campus Connect functions!";

/// 任意方法均返回问候语
#[utoipa::path(
    get,
    path = "/functions/hello-world",
    responses((status = 200, description = "Greeting"))
)]
pub async fn hello_world() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": GREETING }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App};

    #[actix_web::test]
    async fn test_any_method_greets() {
        let app = test::init_service(
            App::new().route("/functions/hello-world", web::to(hello_world)),
        )
        .await;

        for req in [
            test::TestRequest::get().uri("/functions/hello-world").to_request(),
            test::TestRequest::put().uri("/functions/hello-world").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], GREETING);
        }
    }
}
