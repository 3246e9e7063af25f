pub mod api;
#[path = "bootstrap/app_bootstrap.rs"]
pub mod app_bootstrap;
pub mod comm;
#[path = "bootstrap/command_registry.rs"]
pub mod command_registry;
pub mod conf;
pub mod error;
pub mod middleware;
#[path = "bootstrap/route_registry.rs"]
pub mod route_registry;

// Modules
pub mod modules;

/// 初始化所有模块的命令
pub fn init_commands() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    // 注册base模块的命令
    registry.register_module(Box::new(modules::base::PortalCommands));
    registry
}

// Re-export bootstrap modules
pub use app_bootstrap::*;
pub use command_registry::*;
pub use route_registry::*;
