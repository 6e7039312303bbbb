pub mod auth_routes;
pub mod dashboard_routes;
pub mod driver_routes;
pub mod maintenance_routes;
pub mod refuel_routes;
pub mod report_routes;
pub mod route_routes;
pub mod user_routes;
pub mod vehicle_routes;
