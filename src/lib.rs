//! Student API - A small student records service
//!
//! Serves create/list/get over HTTP, persisting records in an embedded
//! ordered key-value store.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use error::StudentError;
pub use store::StudentStore;
