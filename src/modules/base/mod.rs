/// Base 模块
/// 包含基础功能和通用组件：演示数据、工作区、共享状态、页面路由和命令
pub mod cmd;
pub mod pages;
pub mod seed;
pub mod state;
pub mod workspace;

pub use cmd::PortalCommands;
pub use pages::configure_page_routes;
pub use state::PortalState;
