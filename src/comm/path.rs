use std::fs;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

const APP_DIR: &str = "campus-connect";

/// 项目数据目录
/// 创建并返回项目的主数据目录路径
pub fn p_data_path() -> AppResult<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| AppError::storage("无法获取用户数据目录 / no data directory available"))?;

    let dir_path = base.join(APP_DIR);
    if !dir_path.exists() {
        fs::create_dir_all(&dir_path)
            .map_err(|e| AppError::storage(format!("{}: {}", dir_path.display(), e)))?;
    }

    Ok(dir_path)
}

/// 会话存储文件路径
/// Default location of the file-backed session storage.
pub fn p_session_path() -> AppResult<PathBuf> {
    Ok(p_data_path()?.join("sessions.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_path_lives_in_data_dir() {
        let session = p_session_path().unwrap();
        assert!(session.ends_with("campus-connect/sessions.json"));
        assert!(p_data_path().unwrap().is_dir());
    }
}
