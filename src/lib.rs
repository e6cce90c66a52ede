//! AdMatch: location-targeted advertising platform lookup.

pub mod admin;
pub mod catalog;
pub mod config;
pub mod feed;
pub mod http;
pub mod index;
pub mod lifecycle;
pub mod observability;

pub use catalog::PlatformCatalog;
pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use index::PathIndex;
pub use lifecycle::Shutdown;
