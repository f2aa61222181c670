use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::advisor::router::{recommend_handler, RecommendationRequest};
use crate::advisor::{advisor_router, AdvisorService};

#[tokio::test]
async fn recommend_handler_rejects_invalid_codes() {
    let (service, _) = build_service();

    let response = recommend_handler::<MemoryStore>(
        State(Arc::new(service)),
        axum::Json(RecommendationRequest {
            answers: answers(&[("business_type", "9")]),
            save: false,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    let message = payload
        .get("error")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    assert!(message.contains("business_type"));
    assert!(message.contains('9'));
}

#[tokio::test]
async fn recommend_handler_reports_store_failures() {
    let service = Arc::new(AdvisorService::new(
        standard_rubric(),
        Arc::new(UnavailableStore),
    ));

    let response = recommend_handler::<UnavailableStore>(
        State(service),
        axum::Json(RecommendationRequest {
            answers: answers(&[("business_type", "1")]),
            save: true,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn recommendations_route_scores_and_ranks() {
    let (service, _) = build_service();
    let router = advisor_router(Arc::new(service));

    let body = json!({
        "answers": { "business_type": "1", "revenue_model": "3" }
    });
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/recommendations")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("template_id"),
        Some(&json!("consulting-agency"))
    );
    assert_eq!(
        payload
            .get("scores")
            .and_then(|scores| scores.get("consulting-agency")),
        Some(&json!(4))
    );
    let ranked = payload
        .get("ranked")
        .and_then(serde_json::Value::as_array)
        .expect("ranked listing");
    assert_eq!(ranked[0].get("template_id"), Some(&json!("consulting-agency")));
    assert!(payload.get("saved_at").is_none());
}

#[tokio::test]
async fn recommendations_route_persists_when_asked() {
    let (service, store) = build_service();
    let router = advisor_router(Arc::new(service));

    let body = json!({
        "answers": { "business_type": "2" },
        "save": true
    });
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/recommendations")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload.get("saved_at").is_some());

    let stored = store.records();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].config.business_type, "Software/SaaS");
}

#[tokio::test]
async fn templates_route_lists_the_registry() {
    let (service, _) = build_service();
    let router = advisor_router(Arc::new(service));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/templates")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let templates = payload.as_array().expect("template listing");
    assert_eq!(templates.len(), 4);
    assert_eq!(templates[0].get("id"), Some(&json!("general-business")));
    assert_eq!(templates[0].get("is_default"), Some(&json!(true)));
}

#[tokio::test]
async fn questions_route_exposes_prompts_and_labels_only() {
    let (service, _) = build_service();
    let router = advisor_router(Arc::new(service));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/questions")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let questions = payload.as_array().expect("question listing");
    assert_eq!(questions.len(), 4);

    let first = &questions[0];
    assert_eq!(first.get("key"), Some(&json!("business_type")));
    let options = first
        .get("options")
        .and_then(serde_json::Value::as_array)
        .expect("options listed");
    assert_eq!(options.len(), 5);
    assert!(options[0].get("label").is_some());
    assert!(options[0].get("contributions").is_none());
}
