use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Capability check shared by page guards and in-page actions.
pub fn role_allows(role: Role, required: &[Role]) -> bool {
    required.contains(&role)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_allows() {
        assert!(role_allows(Role::Admin, &[Role::Admin]));
        assert!(role_allows(Role::Teacher, &[Role::Admin, Role::Teacher]));
        assert!(!role_allows(Role::Student, &[Role::Admin, Role::Teacher]));
        assert!(!role_allows(Role::Admin, &[]));
    }

    #[test]
    fn test_role_parse_and_display() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert_eq!(" Teacher ".parse::<Role>().unwrap(), Role::Teacher);
        assert!("principal".parse::<Role>().is_err());
    }

    #[test]
    fn test_user_wire_format() {
        let user: User = serde_json::from_str(
            r#"{"id":"9","name":"Guest","email":"g@academy.edu","role":"student"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Student);
        assert!(user.avatar.is_none());

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("avatar").is_none());
        assert_eq!(json["role"], "student");
    }
}
