// Author: 金书记
//
//! 会话存储
//! Session storage: a small string key/value store standing in for the browser's local storage.

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{AppError, AppResult};

/// 键值存储接口
/// Key/value storage interface
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;

    fn remove_item(&self, key: &str) -> AppResult<()>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 内存存储，进程退出后丢失
/// Memory storage, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        self.items.write().remove(key);
        Ok(())
    }

    fn len(&self) -> usize {
        self.items.read().len()
    }
}

/// 文件存储，整个键空间保存为一个 JSON 对象
/// File storage, the whole key space is kept as one JSON object
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// 打开存储文件，不存在时创建空存储
    /// Open the storage file, starting empty when it does not exist
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let items = if path.exists() {
            let raw = fs::read_to_string(&path)
                .map_err(|e| AppError::storage(format!("{}: {}", path.display(), e)))?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    AppError::storage(format!("{} is not a session file: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::info!(path = %path.display(), entries = items.len(), "opened session storage");
        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| AppError::storage(format!("{}: {}", parent.display(), e)))?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let body = serde_json::to_string_pretty(items)?;
        fs::write(&tmp, body).map_err(|e| AppError::storage(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| AppError::storage(format!("{}: {}", self.path.display(), e)))
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let mut items = self.items.write();
        items.insert(key.to_string(), value.to_string());
        self.persist(&items)
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        let mut items = self.items.write();
        if items.remove(key).is_some() {
            self.persist(&items)?;
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.items.read().len()
    }
}

/// 按客户端划分的存储视图
/// Per-client view over a shared storage: every key is prefixed with the client id.
#[derive(Clone)]
pub struct ScopedStorage {
    inner: Arc<dyn SessionStorage>,
    scope: String,
}

impl ScopedStorage {
    pub fn new(inner: Arc<dyn SessionStorage>, scope: impl Into<String>) -> Self {
        Self {
            inner,
            scope: scope.into(),
        }
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}:{}", self.scope, key)
    }

    pub fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get_item(&self.scoped(key))
    }

    pub fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set_item(&self.scoped(key), value)
    }

    pub fn remove_item(&self, key: &str) -> AppResult<()> {
        self.inner.remove_item(&self.scoped(key))
    }
}
