//! Authentication payloads.

use serde::{Deserialize, Serialize};

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Login response.
///
/// Only `token` is interpreted; everything else the server sends is kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_keeps_extra_fields() {
        let response: LoginResponse = serde_json::from_value(json!({
            "token": "abc.def.ghi",
            "expiration": "2030-01-01T00:00:00Z",
            "email": "ana@example.com"
        }))
        .unwrap();

        assert_eq!(response.token, "abc.def.ghi");
        assert_eq!(response.extra.len(), 2);
        assert_eq!(response.extra["email"], "ana@example.com");
    }

    #[test]
    fn test_login_response_requires_token() {
        let result: Result<LoginResponse, _> =
            serde_json::from_value(json!({ "message": "invalid" }));
        assert!(result.is_err());
    }
}
