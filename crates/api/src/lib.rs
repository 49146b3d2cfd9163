pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

pub use config::AppConfig;
pub use state::AppState;
