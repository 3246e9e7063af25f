// Author: 金书记
//
//! 会话存储与门户状态初始化
//! Session storage and portal state initialization

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::comm::config_validator::{AppConfiguration, StorageBackend};
use crate::comm::path::p_session_path;
use crate::comm::TracingListener;
use crate::error::AppResult;
use crate::modules::auth::session::SessionSettings;
use crate::modules::auth::storage::{FileStorage, MemoryStorage, SessionStorage};
use crate::modules::base::state::PortalState;

/// 初始化会话存储
/// Initialize session storage
///
/// `session.storage = "file"` 时写入 `session.file`，未配置则使用数据目录
/// With the file backend, `session.file` wins over the data directory default
pub fn init_session_storage(config: &AppConfiguration) -> AppResult<Arc<dyn SessionStorage>> {
    match config.session_storage {
        StorageBackend::Memory => {
            tracing::info!("使用内存存储 / using memory session storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::File => {
            let path = match &config.session_file {
                Some(file) => PathBuf::from(file),
                None => p_session_path()?,
            };
            let storage = FileStorage::open(path)?;
            tracing::info!("使用文件存储 / using file session storage: {}", storage.path().display());
            Ok(Arc::new(storage))
        }
    }
}

/// 初始化会话设置：登录延迟与监听器
pub fn init_session_settings(config: &AppConfiguration) -> SessionSettings {
    SessionSettings::new(Duration::from_millis(config.login_delay_ms))
        .with_listener(Arc::new(TracingListener))
}

/// 构建门户共享状态
pub fn init_portal_state(config: &AppConfiguration) -> AppResult<PortalState> {
    let storage = init_session_storage(config)?;
    Ok(PortalState::new(storage, init_session_settings(config)))
}
