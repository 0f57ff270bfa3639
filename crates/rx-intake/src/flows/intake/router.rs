use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::MedicationCatalog;
use super::domain::AnswerValue;
use super::repository::{RepositoryError, SessionId, SessionRepository, SubmissionSink};
use super::service::{IntakeService, SessionError};

/// Router builder exposing the intake engine to the renderer.
pub fn intake_router<R, S, C>(service: Arc<IntakeService<R, S, C>>) -> Router
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
    C: MedicationCatalog + 'static,
{
    Router::new()
        .route("/api/v1/intake/sessions", post(start_handler::<R, S, C>))
        .route(
            "/api/v1/intake/sessions/:session_id",
            get(view_handler::<R, S, C>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/answers",
            post(answer_handler::<R, S, C>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/next",
            post(advance_handler::<R, S, C>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/back",
            post(retreat_handler::<R, S, C>),
        )
        .route(
            "/api/v1/intake/sessions/:session_id/submission",
            post(submit_handler::<R, S, C>),
        )
        .route(
            "/api/v1/intake/medications",
            get(medications_handler::<R, S, C>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct AnswerPayload {
    pub field: String,
    pub value: AnswerValue,
}

#[derive(Debug, Deserialize)]
pub struct MedicationsQuery {
    pub state: Option<String>,
}

pub(crate) async fn start_handler<R, S, C>(
    State(service): State<Arc<IntakeService<R, S, C>>>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
    C: MedicationCatalog + 'static,
{
    match service.start() {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn view_handler<R, S, C>(
    State(service): State<Arc<IntakeService<R, S, C>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
    C: MedicationCatalog + 'static,
{
    match service.view(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn answer_handler<R, S, C>(
    State(service): State<Arc<IntakeService<R, S, C>>>,
    Path(session_id): Path<String>,
    axum::Json(payload): axum::Json<AnswerPayload>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
    C: MedicationCatalog + 'static,
{
    match service.answer(&SessionId(session_id), &payload.field, payload.value) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn advance_handler<R, S, C>(
    State(service): State<Arc<IntakeService<R, S, C>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
    C: MedicationCatalog + 'static,
{
    match service.advance(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn retreat_handler<R, S, C>(
    State(service): State<Arc<IntakeService<R, S, C>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
    C: MedicationCatalog + 'static,
{
    match service.retreat(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<R, S, C>(
    State(service): State<Arc<IntakeService<R, S, C>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
    C: MedicationCatalog + 'static,
{
    match service.submit(&SessionId(session_id)) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn medications_handler<R, S, C>(
    State(service): State<Arc<IntakeService<R, S, C>>>,
    Query(query): Query<MedicationsQuery>,
) -> Response
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
    C: MedicationCatalog + 'static,
{
    let state = query.state.unwrap_or_else(|| "unknown".to_owned());
    let listings = service.medications(&state);
    (StatusCode::OK, axum::Json(listings)).into_response()
}

fn error_response(err: SessionError) -> Response {
    let status = match &err {
        SessionError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SessionError::Repository(RepositoryError::Conflict)
        | SessionError::NotActive(_)
        | SessionError::IncompleteStep(_)
        | SessionError::NotAtReview(_) => StatusCode::CONFLICT,
        SessionError::FieldNotOnScreen { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Repository(RepositoryError::Unavailable(_))
        | SessionError::Sink(_)
        | SessionError::Flow(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = axum::Json(json!({ "error": err.to_string() }));
    (status, body).into_response()
}
