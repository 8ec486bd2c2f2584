//! REST API with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use common::{ApiError, ApiResponse, ValidatedJson};
pub use router::{create_api_router, ApiDoc, AppState};
