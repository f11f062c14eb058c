//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    add_question, health, list_categories, list_questions, metrics_page, questions_by_category,
    random_question, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Question endpoints
        .route("/preguntas", get(list_questions))
        .route("/pregunta/random", get(random_question))
        .route("/preguntas/:categoria", get(questions_by_category))
        .route("/agregar", post(add_question))
        .route("/categorias", get(list_categories))
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics_page))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
