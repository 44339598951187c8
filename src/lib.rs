pub mod app;
pub mod charts;
pub mod config;
pub mod errors;
pub mod exercise;
pub mod habit;
pub mod handlers;
pub mod models;
pub mod persistence;
pub mod progress;
pub mod state;
pub mod storage;
pub mod ui;
pub mod validation;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
