//! Multi-Tenant Config Dashboard Library

pub mod auth;
pub mod http;
pub mod records;
pub mod settings;

pub use http::HttpServer;
pub use records::{ConfigRecord, ConfigResolver, ConfigTable, RecordStore};
pub use settings::Settings;
