//! Modelo de User
//!
//! Usuarios del back-office con rol y banderas de permiso.
//! Las banderas se guardan como columnas booleanas de la tabla users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Rol del usuario - mapea al ENUM user_role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Manager,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Manager => "manager",
            UserRole::Admin => "admin",
        }
    }
}

/// Permisos individuales que protegen los endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewVehicles,
    ManageVehicles,
    ViewRoutes,
    EditRoutes,
    ViewRefuels,
    AddRefuels,
    GenerateReports,
    ManageUsers,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewVehicles => "view_vehicles",
            Permission::ManageVehicles => "manage_vehicles",
            Permission::ViewRoutes => "view_routes",
            Permission::EditRoutes => "edit_routes",
            Permission::ViewRefuels => "view_refuels",
            Permission::AddRefuels => "add_refuels",
            Permission::GenerateReports => "generate_reports",
            Permission::ManageUsers => "manage_users",
        }
    }
}

/// Banderas de permiso de un usuario
#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Permissions {
    pub view_vehicles: bool,
    pub manage_vehicles: bool,
    pub view_routes: bool,
    pub edit_routes: bool,
    pub view_refuels: bool,
    pub add_refuels: bool,
    pub generate_reports: bool,
    pub manage_users: bool,
}

impl Default for Permissions {
    /// Usuario nuevo: solo lectura de flota, rutas y abastecimientos
    fn default() -> Self {
        Self {
            view_vehicles: true,
            manage_vehicles: false,
            view_routes: true,
            edit_routes: false,
            view_refuels: true,
            add_refuels: false,
            generate_reports: false,
            manage_users: false,
        }
    }
}

impl Permissions {
    pub fn all() -> Self {
        Self {
            view_vehicles: true,
            manage_vehicles: true,
            view_routes: true,
            edit_routes: true,
            view_refuels: true,
            add_refuels: true,
            generate_reports: true,
            manage_users: true,
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::ViewVehicles => self.view_vehicles,
            Permission::ManageVehicles => self.manage_vehicles,
            Permission::ViewRoutes => self.view_routes,
            Permission::EditRoutes => self.edit_routes,
            Permission::ViewRefuels => self.view_refuels,
            Permission::AddRefuels => self.add_refuels,
            Permission::GenerateReports => self.generate_reports,
            Permission::ManageUsers => self.manage_users,
        }
    }
}

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    #[sqlx(flatten)]
    pub permissions: Permissions,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        role: UserRole,
        permissions: Permissions,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.trim().to_string(),
            email: email.trim().to_lowercase(),
            password_hash,
            role,
            permissions,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// El rol admin pasa cualquier comprobación; el resto depende de la bandera
    pub fn can(&self, permission: Permission) -> bool {
        self.is_admin() || self.permissions.allows(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: UserRole, permissions: Permissions) -> User {
        User::new("joao".into(), "Joao@GrupoMM.com ".into(), "hash".into(), role, permissions)
    }

    #[test]
    fn test_default_permissions_are_read_only() {
        let perms = Permissions::default();
        assert!(perms.allows(Permission::ViewVehicles));
        assert!(perms.allows(Permission::ViewRoutes));
        assert!(perms.allows(Permission::ViewRefuels));
        assert!(!perms.allows(Permission::EditRoutes));
        assert!(!perms.allows(Permission::ManageUsers));
    }

    #[test]
    fn test_admin_bypasses_flags() {
        let admin = user_with(UserRole::Admin, Permissions::default());
        assert!(admin.can(Permission::ManageUsers));
        assert!(admin.can(Permission::GenerateReports));

        let manager = user_with(UserRole::Manager, Permissions::default());
        assert!(!manager.can(Permission::GenerateReports));
    }

    #[test]
    fn test_email_is_normalized() {
        let user = user_with(UserRole::User, Permissions::default());
        assert_eq!(user.email, "joao@grupomm.com");
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = user_with(UserRole::User, Permissions::default());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "user");
    }
}
