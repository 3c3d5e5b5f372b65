pub mod auth_dto;
pub mod document_dto;
pub mod driver_dto;
pub mod rental_dto;
pub mod vehicle_dto;
