use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/insights", get(handlers::insights))
        .route("/upload", get(handlers::upload_page))
        .route("/about", get(handlers::about))
        .route("/add", get(handlers::add_page).post(handlers::add_form))
        .route("/refresh", post(handlers::refresh_form))
        .route("/save", post(handlers::save_form))
        .route("/api/dataset", get(handlers::get_dataset))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/charts", get(handlers::get_charts))
        .route("/api/advice", get(handlers::get_advice))
        .route("/api/upload", post(handlers::upload))
        .route("/api/entries", post(handlers::create_entry))
        .route("/api/save", post(handlers::save))
        .route("/api/refresh", post(handlers::refresh))
        .fallback(handlers::fallback)
        .with_state(state)
}
