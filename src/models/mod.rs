pub mod alert;
pub mod application;
pub mod document;
pub mod driver;
pub mod user;
pub mod vehicle;

pub use alert::{AlertLevel, AlertOwner, ExpiryAlert};
pub use application::{ApplicationStatus, RentalApplication};
pub use document::{is_vehicle_document_type, Document, DocumentStatus, VEHICLE_DOCUMENT_TYPES};
pub use driver::{Driver, DriverStatus};
pub use user::{User, UserRole, VerificationToken};
pub use vehicle::{Vehicle, VehicleStatus};
