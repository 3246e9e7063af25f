use async_trait::async_trait;

use crate::modules::auth::models::User;

/// 会话事件监听器
/// Session lifecycle hooks, called after the session state has changed.
#[async_trait]
pub trait SessionListener: Send + Sync {
    async fn on_login(&self, client_id: &str, user: &User);

    async fn on_login_failed(&self, _client_id: &str, _email: &str) {}

    async fn on_logout(&self, client_id: &str, user: &User);
}

/// 日志监听器
pub struct TracingListener;

#[async_trait]
impl SessionListener for TracingListener {
    async fn on_login(&self, client_id: &str, user: &User) {
        tracing::info!(client = client_id, user = %user.id, role = %user.role, "user logged in");
    }

    async fn on_login_failed(&self, client_id: &str, email: &str) {
        tracing::warn!(client = client_id, email, "login rejected");
    }

    async fn on_logout(&self, client_id: &str, user: &User) {
        tracing::info!(client = client_id, user = %user.id, "user logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::models::Role;
    use crate::modules::base::seed::first_user_with_role;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingListener {
        logins: AtomicUsize,
    }

    #[async_trait]
    impl SessionListener for CountingListener {
        async fn on_login(&self, _client_id: &str, _user: &User) {
            self.logins.fetch_add(1, Ordering::SeqCst);
        }

        async fn on_logout(&self, _client_id: &str, _user: &User) {}
    }

    #[actix_web::test]
    async fn test_login_failed_hook_is_optional() {
        let listener = CountingListener::default();
        listener.on_login_failed("c1", "nobody@academy.edu").await;

        let user = first_user_with_role(Role::Student).unwrap();
        listener.on_login("c1", user).await;
        assert_eq!(listener.logins.load(Ordering::SeqCst), 1);
    }
}
