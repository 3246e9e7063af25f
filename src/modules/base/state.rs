//! 应用共享状态
//! Shared application state handed to every handler through `web::Data`.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::modules::auth::session::{SessionContext, SessionSettings};
use crate::modules::auth::storage::SessionStorage;
use crate::modules::base::workspace::Workspace;
use crate::modules::settings::models::PortalSettings;

pub struct PortalState {
    storage: Arc<dyn SessionStorage>,
    session_settings: Arc<SessionSettings>,
    workspaces: RwLock<HashMap<String, Workspace>>,
    settings: RwLock<PortalSettings>,
}

impl PortalState {
    pub fn new(storage: Arc<dyn SessionStorage>, session_settings: SessionSettings) -> Self {
        Self {
            storage,
            session_settings: Arc::new(session_settings),
            workspaces: RwLock::new(HashMap::new()),
            settings: RwLock::new(PortalSettings::default()),
        }
    }

    /// 为客户端恢复会话
    pub fn session(&self, client_id: &str) -> SessionContext {
        SessionContext::init(
            client_id,
            self.storage.clone(),
            self.session_settings.clone(),
        )
    }

    /// 读取工作区，首次访问时以演示数据创建
    pub fn read_workspace<R>(&self, client_id: &str, f: impl FnOnce(&Workspace) -> R) -> R {
        if let Some(workspace) = self.workspaces.read().get(client_id) {
            return f(workspace);
        }
        self.with_workspace(client_id, |workspace| f(workspace))
    }

    pub fn with_workspace<R>(&self, client_id: &str, f: impl FnOnce(&mut Workspace) -> R) -> R {
        let mut workspaces = self.workspaces.write();
        let workspace = workspaces
            .entry(client_id.to_string())
            .or_insert_with(Workspace::seeded);
        f(workspace)
    }

    /// 丢弃工作区，下次访问时重新加载演示数据
    pub fn invalidate_workspace(&self, client_id: &str) {
        if self.workspaces.write().remove(client_id).is_some() {
            tracing::debug!(client = client_id, "workspace invalidated");
        }
    }

    pub fn workspace_count(&self) -> usize {
        self.workspaces.read().len()
    }

    pub fn settings(&self) -> PortalSettings {
        self.settings.read().clone()
    }

    pub fn with_settings<R>(&self, f: impl FnOnce(&mut PortalSettings) -> R) -> R {
        f(&mut self.settings.write())
    }
}
