/// 中间件模块
pub mod route_guard;

pub use route_guard::RouteGuardMiddleware;
