//! Models Module
//!
//! Request and response DTOs for the HTTP API.

mod requests;
mod responses;

pub use requests::CreateProductRequest;
pub use responses::{ErrorResponse, HealthResponse};
