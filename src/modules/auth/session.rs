// Author: 金书记
//
//! 会话上下文
//! Per-client session: the current user, persisted under the `user` key of the client's storage.

use std::sync::Arc;
use std::time::Duration;

use crate::comm::{Notification, Notifications, SessionListener};
use crate::error::{AppError, AppResult};
use crate::modules::auth::models::{role_allows, Role, User};
use crate::modules::auth::storage::{ScopedStorage, SessionStorage};
use crate::modules::base::seed;

/// 会话存储键
pub const SESSION_KEY: &str = "user";

/// 所有演示账号共用的密码
pub const SHARED_PASSWORD: &str = "password";

/// 会话设置，进程内共享
pub struct SessionSettings {
    pub login_delay: Duration,
    pub listeners: Vec<Arc<dyn SessionListener>>,
}

impl SessionSettings {
    pub fn new(login_delay: Duration) -> Self {
        Self {
            login_delay,
            listeners: Vec::new(),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.listeners.push(listener);
        self
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

pub struct SessionContext {
    client_id: String,
    storage: ScopedStorage,
    settings: Arc<SessionSettings>,
    user: Option<User>,
    notifications: Notifications,
}

impl SessionContext {
    /// 从存储恢复会话；缺失或无法解析的值视为未登录
    /// Restore the session; a missing or unparsable value means logged out.
    pub fn init(
        client_id: impl Into<String>,
        storage: Arc<dyn SessionStorage>,
        settings: Arc<SessionSettings>,
    ) -> Self {
        let client_id = client_id.into();
        let storage = ScopedStorage::new(storage, client_id.clone());

        let user = match storage.get_item(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(client = %client_id, "discarding unreadable session: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(client = %client_id, "session storage unavailable: {}", e);
                None
            }
        };

        Self {
            client_id,
            storage,
            settings,
            user,
            notifications: Notifications::default(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// 无会话时返回 false
    pub fn has_permission(&self, roles: &[Role]) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| role_allows(user.role, roles))
    }

    pub fn require_user(&self) -> AppResult<&User> {
        self.user.as_ref().ok_or(AppError::Unauthenticated)
    }

    /// 校验角色，失败时记录提示
    pub fn require_roles(&mut self, roles: &[Role], denied: &str) -> AppResult<User> {
        let user = self.require_user()?.clone();
        if role_allows(user.role, roles) {
            return Ok(user);
        }

        tracing::info!(client = %self.client_id, role = %user.role, "permission denied");
        let error = AppError::permission(denied);
        if let Some(notification) = error.notification() {
            self.notify(notification);
        }
        Err(error)
    }

    /// 模拟登录：等待配置的延迟后按邮箱和共享密码匹配演示账号
    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<User> {
        if !self.settings.login_delay.is_zero() {
            tokio::time::sleep(self.settings.login_delay).await;
        }

        let found = seed::find_user_by_email(email).filter(|_| password == SHARED_PASSWORD);
        match found {
            Some(user) => self.establish(user.clone()).await,
            None => {
                for listener in &self.settings.listeners {
                    listener.on_login_failed(&self.client_id, email).await;
                }
                let error = AppError::auth("Invalid email or password.");
                if let Some(notification) = error.notification() {
                    self.notify(notification);
                }
                Err(error)
            }
        }
    }

    /// 演示登录：使用该角色的第一个演示账号
    pub async fn login_as(&mut self, role: Role) -> AppResult<User> {
        let email = seed::first_user_with_role(role)
            .map(|user| user.email.clone())
            .ok_or_else(|| AppError::not_found(format!("demo account for role {}", role)))?;
        self.login(&email, SHARED_PASSWORD).await
    }

    async fn establish(&mut self, user: User) -> AppResult<User> {
        let raw = serde_json::to_string(&user)?;
        self.storage.set_item(SESSION_KEY, &raw)?;
        self.user = Some(user.clone());

        for listener in &self.settings.listeners {
            listener.on_login(&self.client_id, &user).await;
        }
        self.notify(Notification::info(
            "Login Successful",
            format!("Welcome back, {}!", user.name),
        ));
        Ok(user)
    }

    /// 注销：清除当前用户和存储键
    pub async fn logout(&mut self) -> AppResult<Option<User>> {
        self.storage.remove_item(SESSION_KEY)?;
        let previous = self.user.take();

        if let Some(user) = &previous {
            for listener in &self.settings.listeners {
                listener.on_logout(&self.client_id, user).await;
            }
        }
        self.notify(Notification::info(
            "Logged Out",
            "You have been logged out successfully.",
        ));
        Ok(previous)
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::storage::MemoryStorage;

    fn settings() -> Arc<SessionSettings> {
        Arc::new(SessionSettings::new(Duration::ZERO))
    }

    #[tokio::test]
    async fn test_every_seed_user_can_log_in() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        for user in seed::USERS.iter() {
            let mut session = SessionContext::init("c1", storage.clone(), settings());
            let logged_in = session.login(&user.email, "password").await.unwrap();
            assert_eq!(&logged_in, user);
            assert_eq!(session.current_user(), Some(user));

            let toasts = session.take_notifications();
            assert_eq!(toasts[0].title, "Login Successful");
            assert_eq!(toasts[0].description, format!("Welcome back, {}!", user.name));
        }
    }

    #[tokio::test]
    async fn test_wrong_password_leaves_session_unset() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        let mut session = SessionContext::init("c1", storage.clone(), settings());

        let result = session.login("admin@academy.edu", "hunter2").await;
        assert!(matches!(result, Err(AppError::Auth { .. })));
        assert!(!session.is_authenticated());
        assert!(storage.get_item("c1:user").unwrap().is_none());

        let toasts = session.take_notifications();
        assert_eq!(toasts[0].title, "Login Failed");
        assert_eq!(toasts[0].description, "Invalid email or password.");
        assert!(toasts[0].is_destructive());
    }

    #[tokio::test]
    async fn test_session_survives_reinit_until_logout() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        let mut session = SessionContext::init("c1", storage.clone(), settings());
        session.login("teacher@academy.edu", "password").await.unwrap();

        let mut restored = SessionContext::init("c1", storage.clone(), settings());
        assert_eq!(restored.current_user().unwrap().id, "2");
        assert!(!SessionContext::init("c2", storage.clone(), settings()).is_authenticated());

        let previous = restored.logout().await.unwrap();
        assert_eq!(previous.unwrap().id, "2");
        assert!(!SessionContext::init("c1", storage, settings()).is_authenticated());
        assert_eq!(restored.take_notifications()[0].title, "Logged Out");
    }

    #[test]
    fn test_unparsable_session_means_logged_out() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        storage.set_item("c1:user", "{not json").unwrap();
        assert!(!SessionContext::init("c1", storage, settings()).is_authenticated());
    }

    #[tokio::test]
    async fn test_has_permission() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        let mut session = SessionContext::init("c1", storage, settings());
        assert!(!session.has_permission(&[Role::Admin, Role::Teacher, Role::Student]));

        session.login_as(Role::Teacher).await.unwrap();
        assert!(session.has_permission(&[Role::Admin, Role::Teacher]));
        assert!(!session.has_permission(&[Role::Admin]));

        let denied = session.require_roles(&[Role::Admin], "Only administrators can add notices.");
        assert!(matches!(denied, Err(AppError::Permission { .. })));
    }
}
