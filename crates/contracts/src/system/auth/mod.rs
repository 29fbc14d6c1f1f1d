use crate::shared::validation::{ValidationResult, ValidationRules};
use crate::system::users::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();
        let rules = ValidationRules::required();
        result.check("username", rules.validate_string(&self.username, "Usuario"));
        result.check("password", rules.validate_string(&self.password, "Contraseña"));
        result
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(rename = "tenantId", default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        let result = LoginRequest {
            username: "ana".into(),
            password: " ".into(),
        }
        .validate();
        assert!(!result.is_valid);
        assert!(result.error("username").is_none());
        assert!(result.error("password").is_some());
    }

    #[test]
    fn test_login_response_parses_role() {
        let json = r#"{"token":"t","user":{"_id":"u1","username":"ana","role":"admin"}}"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.user.role, Role::Admin);
        assert_eq!(response.user.tenant_id, None);
    }
}
