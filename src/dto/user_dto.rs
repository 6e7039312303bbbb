use serde::Deserialize;
use validator::Validate;

use crate::models::user::{Permissions, UserRole};
use crate::utils::validation::validate_username;

// Request para crear un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50), custom = "validate_username")]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub permissions: Permissions,
}

// Request para actualizar un usuario; la contraseña solo cambia si se envía
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50), custom = "validate_username")]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: Option<String>,
    pub role: UserRole,
    pub permissions: Permissions,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateUserRequest {
        CreateUserRequest {
            username: "operador".to_string(),
            email: "operador@frota.local".to_string(),
            password: "secret123".to_string(),
            role: UserRole::User,
            permissions: Permissions::default(),
        }
    }

    #[test]
    fn test_email_length_matches_column() {
        assert!(request().validate().is_ok());

        let email = format!("{}@frota.local", "a".repeat(250));
        let long_email = CreateUserRequest { email, ..request() };
        assert!(long_email.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn test_username_cannot_look_like_an_email() {
        let create = CreateUserRequest { username: "ana@frota".to_string(), ..request() };
        assert!(create.validate().unwrap_err().field_errors().contains_key("username"));

        let update = UpdateUserRequest {
            username: "ana@frota".to_string(),
            email: "ana@frota.local".to_string(),
            password: None,
            role: UserRole::User,
            permissions: Permissions::default(),
        };
        assert!(update.validate().unwrap_err().field_errors().contains_key("username"));
    }
}
