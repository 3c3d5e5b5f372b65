pub mod alert_routes;
pub mod auth_routes;
pub mod driver_routes;
pub mod rental_routes;
pub mod vehicle_routes;

pub use alert_routes::create_alert_router;
pub use auth_routes::create_auth_router;
pub use driver_routes::create_driver_router;
pub use rental_routes::create_rental_router;
pub use vehicle_routes::create_vehicle_router;
