//! 认证相关模型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 登录凭证
///
/// 仅在一次登录请求期间存在，从不落盘
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"REDACTED")
            .finish()
    }
}

/// 登录成功后获得的会话（身份信息 + bearer 令牌）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    /// 令牌类型，线上字段名为 "type"
    #[serde(rename = "type", default = "default_token_type")]
    pub token_type: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// 忘记密码请求
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// 重置密码请求
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

impl fmt::Debug for ResetPasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetPasswordRequest")
            .field("token", &self.token)
            .field("new_password", &"REDACTED")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        };

        let debug = format!("{:?}", credentials);
        assert!(debug.contains("admin"));
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("admin123"));
    }

    #[test]
    fn test_credentials_wire_format() {
        let credentials = Credentials {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        };

        let json = serde_json::to_string(&credentials).unwrap();
        assert!(json.contains("\"username\":\"admin\""));
        assert!(json.contains("\"password\":\"admin123\""));
    }

    #[test]
    fn test_session_deserializes_camel_case_wire_format() {
        let json = r#"{
            "token": "abc123",
            "type": "Bearer",
            "username": "admin",
            "email": "a@x.com",
            "fullName": "Admin",
            "role": "ADMIN"
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.token, "abc123");
        assert_eq!(session.token_type, "Bearer");
        assert_eq!(session.username, "admin");
        assert_eq!(session.full_name, "Admin");
        assert_eq!(session.role, "ADMIN");
    }

    #[test]
    fn test_session_token_type_defaults_to_bearer() {
        let json = r#"{
            "token": "abc123",
            "username": "admin",
            "email": "a@x.com",
            "fullName": "Admin",
            "role": "ADMIN"
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.token_type, "Bearer");
    }

    #[test]
    fn test_session_round_trip_preserves_wire_keys() {
        let session = Session {
            token: "abc123".to_string(),
            token_type: "Bearer".to_string(),
            username: "admin".to_string(),
            email: "a@x.com".to_string(),
            full_name: "Admin".to_string(),
            role: "ADMIN".to_string(),
        };

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"type\":\"Bearer\""));
        assert!(json.contains("\"fullName\":\"Admin\""));

        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, session);
    }

    #[test]
    fn test_reset_password_request_uses_camel_case() {
        let request = ResetPasswordRequest {
            token: "reset-token".to_string(),
            new_password: "NewPass123".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"newPassword\":\"NewPass123\""));

        let debug = format!("{:?}", request);
        assert!(!debug.contains("NewPass123"));
    }
}
