use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::comm::notification::Notification;

/// 统一的应用错误类型
#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::comm::config::ConfigError),

    /// Bad credentials on login.
    #[error("{message}")]
    Auth { message: String },

    /// No current user for a request that needs one.
    #[error("not authenticated")]
    Unauthenticated,

    #[error("{message}")]
    Permission { message: String },

    #[error("{message}")]
    Validation { field: String, message: String },

    /// Event-type catalog rejected the change (empty or duplicate name).
    #[error("{message}")]
    Settings { message: String },

    #[error("session storage error: {message}")]
    Storage { message: String },

    #[error("database error: {message}")]
    Database { message: String },

    #[error("resource not found: {resource}")]
    NotFound { resource: String },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// 创建认证错误
    pub fn auth<T: Into<String>>(message: T) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// 创建权限错误
    pub fn permission<T: Into<String>>(message: T) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    /// 创建验证错误
    pub fn validation<T: Into<String>, U: Into<String>>(field: T, message: U) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn settings<T: Into<String>>(message: T) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }

    pub fn storage<T: Into<String>>(message: T) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn database<T: Into<String>>(message: T) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn not_found<T: Into<String>>(resource: T) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// 获取错误代码
    pub fn error_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 1001,
            AppError::Auth { .. } => 1002,
            AppError::Unauthenticated => 1003,
            AppError::Permission { .. } => 1004,
            AppError::Validation { .. } => 1005,
            AppError::Storage { .. } => 1006,
            AppError::Database { .. } => 1007,
            AppError::NotFound { .. } => 1008,
            AppError::Json(_) => 1009,
            AppError::Settings { .. } => 1010,
            AppError::Internal(_) => 1000,
        }
    }

    /// Variant name reported in the `type` field of the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::Auth { .. } => "Auth",
            AppError::Unauthenticated => "Unauthenticated",
            AppError::Permission { .. } => "Permission",
            AppError::Validation { .. } => "Validation",
            AppError::Settings { .. } => "Settings",
            AppError::Storage { .. } => "Storage",
            AppError::Database { .. } => "Database",
            AppError::NotFound { .. } => "NotFound",
            AppError::Json(_) => "Json",
            AppError::Internal(_) => "Internal",
        }
    }

    /// 获取HTTP状态码
    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::Auth { .. } | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Permission { .. } => StatusCode::FORBIDDEN,
            AppError::Validation { .. } | AppError::Settings { .. } | AppError::Json(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Storage { .. }
            | AppError::Database { .. }
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The toast a user sees for this failure, if it is user-facing at all.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            AppError::Auth { message } => Some(Notification::destructive("Login Failed", message)),
            AppError::Permission { message } => {
                Some(Notification::destructive("Permission Denied", message))
            }
            AppError::Validation { message, .. } => {
                Some(Notification::destructive("Missing Information", message))
            }
            AppError::Settings { message } => Some(Notification::destructive("Error", message)),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = AppError::status_code(self);
        let message = self.to_string();

        // 记录错误日志
        match self {
            AppError::Internal(_)
            | AppError::Database { .. }
            | AppError::Storage { .. }
            | AppError::Config(_) => {
                tracing::error!(code = self.error_code(), "internal error: {}", message);
            }
            _ => {
                tracing::info!(code = self.error_code(), "client error: {}", message);
            }
        }

        HttpResponse::build(status).json(json!({
            "success": false,
            "error": {
                "code": self.error_code(),
                "message": message,
                "type": self.kind(),
            },
            "notification": self.notification(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}

/// 应用结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 成功响应结构
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            notifications: Vec::new(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_notifications(mut self, notifications: Vec<Notification>) -> Self {
        self.notifications = notifications;
        self
    }
}

/// 便捷宏：创建API成功响应
#[macro_export]
macro_rules! api_success {
    ($data:expr) => {
        Ok(actix_web::web::Json($crate::error::ApiResponse::success($data)))
    };
    ($data:expr, $notifications:expr) => {
        Ok(actix_web::web::Json(
            $crate::error::ApiResponse::success($data).with_notifications($notifications),
        ))
    };
}
