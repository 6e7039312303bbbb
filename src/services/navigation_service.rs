//! Menú de navegación según rol y permisos

use crate::dto::auth_dto::NavigationItem;
use crate::models::user::{Permission, User};

const COMMON_ITEMS: [NavigationItem; 7] = [
    NavigationItem { key: "dashboard", label: "Dashboard", path: "/dashboard" },
    NavigationItem { key: "vehicles", label: "Vehículos", path: "/vehicles" },
    NavigationItem { key: "maintenances", label: "Mantenimientos", path: "/maintenances" },
    NavigationItem { key: "drivers", label: "Conductores", path: "/drivers" },
    NavigationItem { key: "routes", label: "Rutas", path: "/routes" },
    NavigationItem { key: "refuels", label: "Abastecimientos", path: "/refuels" },
    NavigationItem { key: "reports", label: "Informes", path: "/reports" },
];

const USERS_ITEM: NavigationItem = NavigationItem {
    key: "users",
    label: "Usuarios",
    path: "/users",
};

/// Entradas visibles para el usuario; "Usuarios" solo con `manage_users` o rol admin
pub fn navigation_for(user: &User) -> Vec<NavigationItem> {
    let mut items = COMMON_ITEMS.to_vec();
    if user.can(Permission::ManageUsers) {
        items.push(USERS_ITEM);
    }
    items
}
