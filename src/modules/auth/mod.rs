/// 认证模块
/// Demo-account login, per-client sessions and role based page guards.
pub mod controller;
pub mod extract;
pub mod guard;
pub mod models;
pub mod session;
pub mod storage;

pub use controller::configure_auth_routes;
pub use session::{SessionContext, SessionSettings};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
