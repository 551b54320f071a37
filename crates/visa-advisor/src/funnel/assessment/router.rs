use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::{deep_dive_questions, Goal, QuestionDescriptor};
use super::countries::match_countries;
use super::domain::{ContactAnswers, PrimaryAnswers, SessionId};
use super::repository::{LeadSink, RepositoryError, SessionRepository};
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing the funnel over HTTP.
pub fn assessment_router<R, S>(service: Arc<AssessmentService<R, S>>) -> Router
where
    R: SessionRepository + 'static,
    S: LeadSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessment/sessions",
            post(create_session_handler::<R, S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id",
            get(snapshot_handler::<R, S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id/primary",
            post(primary_handler::<R, S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id/deep-dive",
            post(deep_dive_handler::<R, S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id/contact",
            post(contact_handler::<R, S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id/advance",
            post(advance_handler::<R, S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id/back",
            post(back_handler::<R, S>),
        )
        .route("/api/v1/assessment/catalog/:goal", get(catalog_handler))
        .route("/api/v1/assessment/countries", get(countries_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeepDiveAnswerRequest {
    pub(crate) question_id: String,
    pub(crate) option: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CountryQuery {
    #[serde(default)]
    pub(crate) q: String,
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AssessmentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let body = Json(json!({ "error": error.to_string() }));
    (status, body).into_response()
}

pub(crate) async fn create_session_handler<R, S>(
    State(service): State<Arc<AssessmentService<R, S>>>,
) -> Response
where
    R: SessionRepository + 'static,
    S: LeadSink + 'static,
{
    match service.create_session() {
        Ok(snapshot) => (StatusCode::CREATED, Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn snapshot_handler<R, S>(
    State(service): State<Arc<AssessmentService<R, S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: LeadSink + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn primary_handler<R, S>(
    State(service): State<Arc<AssessmentService<R, S>>>,
    Path(session_id): Path<String>,
    Json(primary): Json<PrimaryAnswers>,
) -> Response
where
    R: SessionRepository + 'static,
    S: LeadSink + 'static,
{
    match service.set_primary(&SessionId(session_id), primary) {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn deep_dive_handler<R, S>(
    State(service): State<Arc<AssessmentService<R, S>>>,
    Path(session_id): Path<String>,
    Json(answer): Json<DeepDiveAnswerRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    S: LeadSink + 'static,
{
    match service.answer_deep_dive(&SessionId(session_id), &answer.question_id, &answer.option) {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn contact_handler<R, S>(
    State(service): State<Arc<AssessmentService<R, S>>>,
    Path(session_id): Path<String>,
    Json(contact): Json<ContactAnswers>,
) -> Response
where
    R: SessionRepository + 'static,
    S: LeadSink + 'static,
{
    match service.set_contact(&SessionId(session_id), contact) {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn advance_handler<R, S>(
    State(service): State<Arc<AssessmentService<R, S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: LeadSink + 'static,
{
    match service.advance(&SessionId(session_id)).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn back_handler<R, S>(
    State(service): State<Arc<AssessmentService<R, S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: LeadSink + 'static,
{
    match service.back(&SessionId(session_id)) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Question descriptors for a goal. An unrecognized goal label yields
/// an empty set rather than an error; the wizard constrains goal
/// selection, so anything else is a hand-edited request.
pub(crate) async fn catalog_handler(Path(goal): Path<String>) -> Json<Vec<QuestionDescriptor>> {
    let questions = Goal::from_label(&goal)
        .map(|goal| deep_dive_questions(goal).to_vec())
        .unwrap_or_default();
    Json(questions)
}

pub(crate) async fn countries_handler(Query(query): Query<CountryQuery>) -> Json<Vec<&'static str>> {
    Json(match_countries(&query.q))
}
