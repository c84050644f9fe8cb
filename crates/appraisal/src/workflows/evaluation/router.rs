use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::workflow_status;

use super::directory::OrgDirectory;
use super::domain::{
    Actor, ActorRole, CycleId, EmployeeId, EvaluationId, EvaluationStage, ItemResponse,
};
use super::notifications::NotificationGateway;
use super::repository::EvaluationRepository;
use super::service::{ConsensusDecision, EvaluationWorkflowService, WorkflowError};

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";
const DEFAULT_LIST_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvaluationRequest {
    pub employee_id: EmployeeId,
    pub cycle_id: CycleId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSubmission {
    pub responses: Vec<ItemResponse>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StageQuery {
    pub stage: Option<String>,
    pub limit: Option<usize>,
}

/// Router builder exposing the evaluation workflow over HTTP. The acting identity comes
/// from the `x-actor-id` / `x-actor-role` headers set by the authenticating proxy.
pub fn evaluation_router<R, D, N>(service: Arc<EvaluationWorkflowService<R, D, N>>) -> Router
where
    R: EvaluationRepository + 'static,
    D: OrgDirectory + 'static,
    N: NotificationGateway + 'static,
{
    Router::new()
        .route(
            "/api/v1/evaluations",
            post(create_handler::<R, D, N>).get(list_handler::<R, D, N>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id",
            get(status_handler::<R, D, N>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/score",
            get(score_handler::<R, D, N>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/self",
            post(self_handler::<R, D, N>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/manager",
            post(manager_handler::<R, D, N>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/consensus",
            post(consensus_handler::<R, D, N>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<R, D, N>(
    State(service): State<Arc<EvaluationWorkflowService<R, D, N>>>,
    payload: Result<axum::Json<CreateEvaluationRequest>, JsonRejection>,
) -> Response
where
    R: EvaluationRepository + 'static,
    D: OrgDirectory + 'static,
    N: NotificationGateway + 'static,
{
    let request = match payload {
        Ok(axum::Json(request)) => request,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.create_evaluation(request.employee_id, request.cycle_id) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, D, N>(
    State(service): State<Arc<EvaluationWorkflowService<R, D, N>>>,
    Query(query): Query<StageQuery>,
) -> Response
where
    R: EvaluationRepository + 'static,
    D: OrgDirectory + 'static,
    N: NotificationGateway + 'static,
{
    let stage = match query.stage.as_deref() {
        None => EvaluationStage::PendingSelf,
        Some(raw) => match EvaluationStage::parse(raw) {
            Some(stage) => stage,
            None => {
                let payload = json!({
                    "error": format!("unknown stage '{raw}'"),
                    "kind": "invalid_query",
                });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        },
    };

    match service.list_by_stage(stage, query.limit.unwrap_or(DEFAULT_LIST_LIMIT)) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, D, N>(
    State(service): State<Arc<EvaluationWorkflowService<R, D, N>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
    D: OrgDirectory + 'static,
    N: NotificationGateway + 'static,
{
    match service.get_status(&EvaluationId(evaluation_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<R, D, N>(
    State(service): State<Arc<EvaluationWorkflowService<R, D, N>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
    D: OrgDirectory + 'static,
    N: NotificationGateway + 'static,
{
    match service.get_score(&EvaluationId(evaluation_id)) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn self_handler<R, D, N>(
    State(service): State<Arc<EvaluationWorkflowService<R, D, N>>>,
    Path(evaluation_id): Path<String>,
    headers: HeaderMap,
    payload: Result<axum::Json<ResponseSubmission>, JsonRejection>,
) -> Response
where
    R: EvaluationRepository + 'static,
    D: OrgDirectory + 'static,
    N: NotificationGateway + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };
    let submission = match payload {
        Ok(axum::Json(submission)) => submission,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.submit_self(&EvaluationId(evaluation_id), &actor, submission.responses) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn manager_handler<R, D, N>(
    State(service): State<Arc<EvaluationWorkflowService<R, D, N>>>,
    Path(evaluation_id): Path<String>,
    headers: HeaderMap,
    payload: Result<axum::Json<ResponseSubmission>, JsonRejection>,
) -> Response
where
    R: EvaluationRepository + 'static,
    D: OrgDirectory + 'static,
    N: NotificationGateway + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };
    let submission = match payload {
        Ok(axum::Json(submission)) => submission,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.submit_manager(&EvaluationId(evaluation_id), &actor, submission.responses) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn consensus_handler<R, D, N>(
    State(service): State<Arc<EvaluationWorkflowService<R, D, N>>>,
    Path(evaluation_id): Path<String>,
    headers: HeaderMap,
    payload: Result<axum::Json<ConsensusDecision>, JsonRejection>,
) -> Response
where
    R: EvaluationRepository + 'static,
    D: OrgDirectory + 'static,
    N: NotificationGateway + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };
    let decision = match payload {
        Ok(axum::Json(decision)) => decision,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.submit_consensus(&EvaluationId(evaluation_id), &actor, decision) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, Response> {
    let id = headers
        .get(ACTOR_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let Some(id) = id else {
        let payload = json!({
            "error": format!("missing {ACTOR_ID_HEADER} header"),
            "kind": "unauthorized",
        });
        return Err((StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response());
    };

    let role = headers
        .get(ACTOR_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ActorRole::parse)
        .unwrap_or_default();

    Ok(Actor {
        id: EmployeeId(id.to_string()),
        role,
    })
}

pub(crate) fn error_response(error: WorkflowError) -> Response {
    let payload = json!({
        "error": error.to_string(),
        "kind": error.kind(),
    });
    (workflow_status(&error), axum::Json(payload)).into_response()
}

/// Body rejections share the workflow error shape. Well-formed JSON with out-of-range or
/// mistyped fields is a validation error; anything else is reported as an invalid body.
pub(crate) fn rejection_response(rejection: JsonRejection) -> Response {
    let status = rejection.status();
    let kind = if status == StatusCode::UNPROCESSABLE_ENTITY {
        "validation_error"
    } else {
        "invalid_body"
    };
    let payload = json!({
        "error": rejection.body_text(),
        "kind": kind,
    });
    (status, axum::Json(payload)).into_response()
}
