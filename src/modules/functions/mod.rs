pub mod hello_world;

use actix_web::web;

pub fn configure_function_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/functions/hello-world").to(hello_world::hello_world))
        .service(web::resource("/functions/db-test").to(db_test::db_test));
}
