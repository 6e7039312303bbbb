use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::User;
use crate::utils::validation::validate_not_empty;

// Login request: `login` acepta usuario o email
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_empty")]
    pub login: String,
    #[serde(default)]
    #[validate(custom = "validate_not_empty")]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

impl LoginResponse {
    pub fn bearer(token: String, expires_in: u64, user: User) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// Entrada del menú de navegación
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavigationItem {
    pub key: &'static str,
    pub label: &'static str,
    pub path: &'static str,
}
