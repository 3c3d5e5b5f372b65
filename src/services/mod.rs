pub mod email_service;
pub mod expiry_service;
pub mod file_service;
pub mod jwt_service;
pub mod lifecycle_service;
