//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned / propagated)
//!     → handlers.rs (upload decoding, query validation)
//!     → PlatformCatalog
//!     → response.rs (errors mapped to status codes)
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use handlers::LoadSummary;
pub use request::{request_id, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
