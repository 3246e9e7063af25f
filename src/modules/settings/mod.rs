/// 设置模块
/// Portal-wide settings, editable by administrators only.
pub mod controller;
pub mod models;
pub mod service;
