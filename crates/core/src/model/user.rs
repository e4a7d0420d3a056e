use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// The authenticated account as returned by `/me` and the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Administrator flag. Absent means not an administrator.
    #[serde(default)]
    pub sysop: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Response of `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub session_token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sysop_flag_means_not_admin() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "0190a6a4-7f3e-7c1a-9d1e-3b2f1c0d4e5f",
            "email": "sam@example.com",
            "firstName": "Sam",
            "lastName": "Lee",
        }))
        .unwrap();
        assert!(!user.sysop);
        assert_eq!(user.full_name(), "Sam Lee");
    }
}
