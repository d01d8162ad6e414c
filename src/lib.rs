pub mod advice;
pub mod app;
pub mod charts;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_initial;
