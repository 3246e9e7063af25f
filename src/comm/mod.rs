/// 通用通信模块
/// Common communication module

pub mod config;
pub mod config_validator;
pub mod date;
pub mod enhanced_config;
pub mod listener;
pub mod notification;
pub mod path;

// 重新导出主要的公共接口
pub use listener::{SessionListener, TracingListener};
pub use notification::{Notification, Notifications};
