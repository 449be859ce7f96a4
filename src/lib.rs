pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod queries;
pub mod routes;
pub mod services;

pub use app::AppState;
pub use config::AppConfig;
pub use error::{AppError, Result};
