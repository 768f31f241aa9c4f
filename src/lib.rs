pub mod app_state;
pub mod auth;
pub mod blog;
pub mod config;
pub mod dtos;
pub mod enquiry;
pub mod extractor;
pub mod health;
pub mod middleware;
pub mod passwords;
pub mod routes;
pub mod site;
pub mod telemetry;

pub use app_state::AppState;
pub use routes::app;
