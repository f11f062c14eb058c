//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use crate::error::ApiError;
use crate::metrics::{self, LatencyTimer};
use crate::question::{NewQuestion, Question};
use crate::service::{CategoryCount, QuestionService};

/// Confirmation message returned by the add endpoint.
pub const ADDED_MESSAGE: &str = "Pregunta agregada";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Question service.
    pub service: Arc<QuestionService>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state without a metrics exporter.
    pub fn new(service: Arc<QuestionService>) -> Self {
        Self {
            service,
            metrics: None,
        }
    }

    /// Attach the Prometheus handle used by `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
    /// Questions in memory.
    pub questions: usize,
}

/// Add endpoint response.
#[derive(Debug, Serialize)]
pub struct AddedResponse {
    /// Confirmation message.
    pub mensaje: &'static str,
    /// The created question.
    pub pregunta: Question,
}

/// `GET /preguntas` - every question, options shuffled.
pub async fn list_questions(State(state): State<AppState>) -> Json<Vec<Question>> {
    let _timer = LatencyTimer::new("/preguntas");
    let questions = state.service.list_all().await;
    metrics::add_questions_served(questions.len());
    Json(questions)
}

/// `GET /pregunta/random` - one random question, `null` when none are loaded.
pub async fn random_question(State(state): State<AppState>) -> Json<Option<Question>> {
    let _timer = LatencyTimer::new("/pregunta/random");
    let question = state.service.random().await;
    if question.is_some() {
        metrics::add_questions_served(1);
    }
    Json(question)
}

/// `GET /preguntas/:categoria` - questions in one category; unknown ones give `[]`.
pub async fn questions_by_category(
    State(state): State<AppState>,
    Path(categoria): Path<String>,
) -> Json<Vec<Question>> {
    let _timer = LatencyTimer::new("/preguntas/:categoria");
    let questions = state.service.by_category(&categoria).await;
    metrics::add_questions_served(questions.len());
    Json(questions)
}

/// `POST /agregar` - create a question.
pub async fn add_question(
    State(state): State<AppState>,
    payload: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<Json<AddedResponse>, ApiError> {
    let _timer = LatencyTimer::new("/agregar");
    let Json(submission) = payload.inspect_err(|_| metrics::inc_question_add_failures())?;
    let pregunta = state.service.add(submission).await?;

    Ok(Json(AddedResponse {
        mensaje: ADDED_MESSAGE,
        pregunta,
    }))
}

/// `GET /categorias` - categories with their question counts.
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryCount>> {
    let _timer = LatencyTimer::new("/categorias");
    Json(state.service.categories().await)
}

/// Health check handler - always returns 200.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        questions: state.service.len().await,
    })
}

/// Prometheus exposition, 404 when no recorder is installed.
pub async fn metrics_page(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled".to_string()),
    }
}
