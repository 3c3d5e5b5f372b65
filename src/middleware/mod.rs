pub mod auth;
pub mod cors;
