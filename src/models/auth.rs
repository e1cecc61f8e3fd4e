use serde::{Deserialize, Serialize};

/// Account role as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub role: Role,
    #[serde(rename = "isEmailVerified")]
    pub is_email_verified: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCredentials {
    pub email: String,
    pub password: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

/// Payload of a successful login: the new access token plus the user record.
/// The token is optional on the wire so a malformed success response can be
/// rejected instead of producing a half-authenticated session.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
    pub user: User,
}

/// Payload of a registration response. The verification token is only echoed
/// back by development servers; production delivers it by email.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterPayload {
    pub user: User,
    #[serde(rename = "emailVerificationToken", default)]
    pub email_verification_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshPayload {
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user() {
        let json = r#"{"id":1,"email":"admin@example.com","firstName":"Admin","lastName":"User","role":"admin","isEmailVerified":true,"createdAt":"2024-01-01T00:00:00.000Z"}"#;
        let user: User = serde_json::from_str(json).expect("Failed to parse user JSON");
        assert_eq!(user.id, 1);
        assert_eq!(user.role, Role::Admin);
        assert!(user.is_admin());
        assert!(user.is_email_verified);
        assert_eq!(user.full_name(), "Admin User");
    }

    #[test]
    fn test_auth_payload_without_token() {
        // A success envelope missing the token must still parse so the
        // session layer can reject it explicitly.
        let json = r#"{"user":{"id":2,"email":"u@example.com","firstName":"U","lastName":"V","role":"user","isEmailVerified":false}}"#;
        let payload: AuthPayload = serde_json::from_str(json).expect("Failed to parse auth payload");
        assert!(payload.access_token.is_none());
        assert!(!payload.user.is_admin());
    }
}
