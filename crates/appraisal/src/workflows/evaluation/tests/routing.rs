use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::evaluation::router::{
    status_handler, ResponseSubmission, ACTOR_ID_HEADER, ACTOR_ROLE_HEADER,
};
use crate::workflows::evaluation::{EvaluationWorkflowService, InMemoryDirectory};

fn post_json(uri: &str, actor: Option<(&str, &str)>, body: Value) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some((id, role)) = actor {
        builder = builder
            .header(ACTOR_ID_HEADER, id)
            .header(ACTOR_ROLE_HEADER, role);
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
        .expect("request")
}

fn submission(answer: u8) -> Value {
    serde_json::to_value(ResponseSubmission {
        responses: uniform_responses(&scoring_config(), answer),
    })
    .expect("serialize submission")
}

#[tokio::test]
async fn create_route_returns_created_status_view() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/evaluations",
            None,
            json!({ "employee_id": "emp-1", "cycle_id": "2025-h1" }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["stage"], "pending_self");
    assert_eq!(body["employee_id"], "emp-1");
    assert_eq!(body["self_completed"], false);
}

#[tokio::test]
async fn full_workflow_over_http() {
    let (service, _, _) = build_service();
    let id = open(&service, "emp-1", "2025-h1");
    let router = router_with_service(service);
    let base = format!("/api/v1/evaluations/{}", id.0);

    let steps = [
        ("self", ("emp-1", "member"), submission(4), "pending_manager"),
        ("manager", ("mgr-1", "member"), submission(4), "pending_consensus"),
        (
            "consensus",
            ("hr-7", "hr_admin"),
            json!({ "final_score_override": null, "notes": "agreed" }),
            "completed",
        ),
    ];
    for (path, actor, body, expected_stage) in steps {
        let response = router
            .clone()
            .oneshot(post_json(&format!("{base}/{path}"), Some(actor), body))
            .await
            .expect("route responds");
        assert_eq!(response.status(), StatusCode::OK, "step {path}");
        let body = read_json_body(response).await;
        assert_eq!(body["stage"], expected_stage);
    }

    let response = router
        .oneshot(
            Request::get(format!("{base}/score"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["overall"], 80);
    assert_eq!(body["dominant_dimension"], "people_interest");
    assert_eq!(body["dimensions"].as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn submission_without_actor_header_is_unauthorized() {
    let (service, _, _) = build_service();
    let id = open(&service, "emp-1", "2025-h1");
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/evaluations/{}/self", id.0),
            None,
            submission(3),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "unauthorized");
}

#[tokio::test]
async fn workflow_errors_map_to_http_statuses() {
    let (service, _, _) = build_service();
    let id = open(&service, "emp-1", "2025-h1");
    let router = router_with_service(service);
    let base = format!("/api/v1/evaluations/{}", id.0);

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("{base}/manager"),
            Some(("mgr-1", "member")),
            submission(3),
        ))
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "invalid_stage");

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("{base}/self"),
            Some(("mgr-1", "member")),
            submission(3),
        ))
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("{base}/self"),
            Some(("emp-1", "member")),
            submission(9),
        ))
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "validation_error");

    let response = router
        .oneshot(post_json(
            "/api/v1/evaluations",
            None,
            json!({ "employee_id": "emp-1", "cycle_id": "2025-h1" }),
        ))
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn undecodable_values_get_the_workflow_error_shape() {
    let (service, _, _) = build_service();
    let id = ready_for_consensus(&service, "2025-h1", 3, 3);
    let pending = open(&service, "emp-3", "2025-h1");
    let router = router_with_service(service);

    let mut oversized = submission(3);
    oversized["responses"][0]["answer"] = json!(300);
    let requests = [
        post_json(
            &format!("/api/v1/evaluations/{}/self", pending.0),
            Some(("emp-3", "member")),
            oversized,
        ),
        post_json(
            &format!("/api/v1/evaluations/{}/consensus", id.0),
            Some(("dir-1", "member")),
            json!({ "final_score_override": 300 }),
        ),
        post_json(
            &format!("/api/v1/evaluations/{}/consensus", id.0),
            Some(("dir-1", "member")),
            json!({ "final_score_override": -1 }),
        ),
    ];

    for request in requests {
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("route responds");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json_body(response).await;
        assert_eq!(body["kind"], "validation_error");
        assert!(body["error"].is_string());
    }

    let response = router
        .clone()
        .oneshot(
            Request::post(format!("/api/v1/evaluations/{}/consensus", id.0))
                .header(header::CONTENT_TYPE, "application/json")
                .header(ACTOR_ID_HEADER, "dir-1")
                .body(Body::from("{not json"))
                .expect("request"),
        )
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "invalid_body");

    let response = router
        .oneshot(
            Request::get(format!("/api/v1/evaluations/{}", id.0))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("route responds");
    let body = read_json_body(response).await;
    assert_eq!(body["stage"], "pending_consensus");
}

#[tokio::test]
async fn list_route_filters_by_stage() {
    let (service, _, _) = build_service();
    open(&service, "emp-1", "2025-h1");
    open(&service, "emp-2", "2025-h1");
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/evaluations?stage=pending_self&limit=1")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let response = router
        .oneshot(
            Request::get("/api/v1/evaluations?stage=archived")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_handler_returns_not_found_for_unknown_id() {
    let (service, _, _) = build_service();

    let response = status_handler::<_, InMemoryDirectory, RecordingNotifier>(
        State(Arc::new(service)),
        Path("eval-unknown".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn status_handler_reports_internal_error_when_storage_is_down() {
    let service = Arc::new(EvaluationWorkflowService::new(
        Arc::new(UnavailableRepository),
        Arc::new(directory()),
        Arc::new(RecordingNotifier::default()),
        scoring_config(),
    ));

    let response = status_handler::<UnavailableRepository, InMemoryDirectory, RecordingNotifier>(
        State(service),
        Path("eval-1".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
