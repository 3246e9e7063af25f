//! 路由守卫
//! Page gate: recomputed from the session on every request, never cached.

use crate::modules::auth::models::{role_allows, Role, User};

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unauthenticated,
    Unauthorized,
    Authorized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
}

/// 角色集合为空时任意已登录用户均可访问
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard {
    allowed_roles: Option<&'static [Role]>,
}

impl RouteGuard {
    pub fn authenticated() -> Self {
        Self { allowed_roles: None }
    }

    pub fn with_roles(roles: &'static [Role]) -> Self {
        Self {
            allowed_roles: Some(roles),
        }
    }

    pub fn state(&self, user: Option<&User>) -> GuardState {
        match (user, self.allowed_roles) {
            (None, _) => GuardState::Unauthenticated,
            (Some(user), Some(roles)) if !role_allows(user.role, roles) => GuardState::Unauthorized,
            (Some(_), _) => GuardState::Authorized,
        }
    }

    pub fn decide(&self, user: Option<&User>) -> GuardDecision {
        match self.state(user) {
            GuardState::Unauthenticated => GuardDecision::Redirect(LOGIN_PATH),
            GuardState::Unauthorized => GuardDecision::Redirect(LANDING_PATH),
            GuardState::Authorized => GuardDecision::Render,
        }
    }
}
