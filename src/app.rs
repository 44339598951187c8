use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/forms", get(handlers::get_forms).put(handlers::save_forms))
        .route("/api/validate", post(handlers::validate_field))
        .route("/api/habit/calculate", post(handlers::calculate_habit))
        .route("/api/exercise/calculate", post(handlers::calculate_exercise))
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/progress/reset", post(handlers::reset_progress))
        .route("/api/charts", get(handlers::get_charts))
        .route("/api/charts/:name", get(handlers::get_chart))
        .with_state(state)
}
