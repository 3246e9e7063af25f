/// 模块管理
/// 包含所有业务模块的定义和导出
pub mod auth;
pub mod base;
pub mod calendar;
pub mod dashboard;
pub mod exams;
pub mod functions;
pub mod holidays;
pub mod notices;
pub mod settings;
