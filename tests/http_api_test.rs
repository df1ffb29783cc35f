mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn status_endpoint_reports_ok() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await;
    assert_eq!(payload["success"], json!(true));
    assert_eq!(payload["data"]["service"], json!("eventops-api"));
}

#[tokio::test]
async fn missing_resource_maps_to_not_found() {
    let app = TestApp::new().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/events/9999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = body_json(response).await;
    assert_eq!(payload["error"], json!("Not Found"));
}

#[tokio::test]
async fn exhausted_category_maps_to_unprocessable_entity() {
    let app = TestApp::new().await;
    let company = app.seed_company().await;
    let event = app.seed_event(company.id, "Gala").await;
    let category = app.seed_category(company.id, "VIP").await;
    // zero seats: every sale is rejected at the boundary
    app.seed_allotment(event.id, category.id, 0).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/purchases")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "company_id": company.id,
                "event_id": event.id,
                "ticket_category_id": category.id,
                "buyer": "María Quispe"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = body_json(response).await;
    assert_eq!(payload["error"], json!("Unprocessable Entity"));
}
