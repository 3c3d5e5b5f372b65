pub mod alert_controller;
pub mod auth_controller;
pub mod document_controller;
pub mod driver_controller;
pub mod rental_controller;
pub mod vehicle_controller;
