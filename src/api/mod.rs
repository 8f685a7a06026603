//! HTTP API module for the summarize, health, and metrics endpoints.

pub mod errors;
pub mod handlers;
pub mod openapi;
pub mod routes;

pub use errors::ErrorBody;
pub use handlers::AppState;
pub use routes::create_router;
