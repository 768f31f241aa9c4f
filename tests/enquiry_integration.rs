mod helpers;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use helpers::{RecordingMailer, TestSite, json_body};

fn enquiry(body: Value, client: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/send-enquiry")
        .header("content-type", "application/json")
        .header("x-forwarded-for", client)
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_enquiry_without_message_omits_message_block() {
    let site = TestSite::new().await;

    let response = site
        .router
        .clone()
        .oneshot(enquiry(
            json!({ "name": "A", "email": "a@b.com", "phone": "5550000", "service": "X" }),
            "10.1.0.1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["success"], true);

    let sent = site.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Enquiry from A - X");
    assert_eq!(sent[0].reply_to, "a@b.com");
    assert!(!sent[0].text.contains("Message:"));
    assert!(!sent[0].html.contains("Message"));
}

#[tokio::test]
async fn test_enquiry_missing_phone_is_400() {
    let site = TestSite::new().await;

    let response = site
        .router
        .clone()
        .oneshot(enquiry(
            json!({ "name": "A", "email": "a@b.com", "service": "X" }),
            "10.1.0.2",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(site.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_relay_failure_is_500_with_details() {
    let site = TestSite::with(
        |config| config,
        RecordingMailer {
            fail: true,
            ..Default::default()
        },
    )
    .await;

    let response = site
        .router
        .clone()
        .oneshot(enquiry(
            json!({ "name": "A", "email": "a@b.com", "phone": "5550000", "service": "X" }),
            "10.1.0.3",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Failed to send enquiry");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_enquiries_are_rate_limited_per_client() {
    let site = TestSite::new().await;
    let body = json!({ "name": "A", "email": "a@b.com", "phone": "5550000", "service": "X" });

    let mut statuses = Vec::new();
    for _ in 0..6 {
        let response = site
            .router
            .clone()
            .oneshot(enquiry(body.clone(), "10.9.9.9"))
            .await
            .unwrap();
        statuses.push(response.status());
    }
    assert!(statuses[..5].iter().all(|s| *s == StatusCode::OK));
    assert_eq!(statuses[5], StatusCode::TOO_MANY_REQUESTS);

    let other = site
        .router
        .clone()
        .oneshot(enquiry(body, "10.9.9.10"))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::OK);
}
