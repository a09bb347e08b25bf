use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::candidate::domain::AdditionalAnswers;
use crate::workflows::candidate::{
    ApplicationStore, CandidateVerificationService, InMemoryApplicationStore, PassThroughVerifier,
    ThresholdPolicy, VerificationOrchestrator,
};

fn answers() -> Value {
    json!({
        "availability": "2 weeks notice",
        "salaryExpectation": "$120,000",
        "workLocation": "Remote",
        "workSchedule": "Full-time",
        "motivation": "I like the product",
        "additionalInfo": ""
    })
}

async fn verified_result() -> Value {
    let (service, _) = build_service();
    let response = router_with_service(service)
        .oneshot(json_request(
            "POST",
            "/api/verify",
            &json!({ "candidateData": candidate() }),
        ))
        .await
        .expect("route executes");
    read_json_body(response).await["data"].clone()
}

#[tokio::test]
async fn verify_route_scores_candidate_with_default_rules() {
    let (service, _) = build_service();

    let response = router_with_service(service)
        .oneshot(json_request(
            "POST",
            "/api/verify",
            &json!({ "candidateData": candidate() }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(true));
    assert_eq!(payload["message"], json!("Verification completed successfully"));
    assert_eq!(payload["data"]["overallScore"], json!(91));
    assert_eq!(payload["data"]["status"], json!("passed"));
    let fields = payload["data"]["fieldResults"]
        .as_array()
        .expect("field results");
    assert_eq!(fields.len(), 6);
    assert_eq!(fields[0]["fieldId"], json!("email"));
    assert_eq!(fields[0]["fieldName"], json!("Email Address"));
    assert_eq!(fields[3]["details"], json!("Matched 3/3 required skills"));
}

#[tokio::test]
async fn verify_route_coerces_numeric_text_experience() {
    let (service, _) = build_service();
    let mut body = json!({ "candidateData": candidate() });
    body["candidateData"]["experience"] = json!("5");

    let response = router_with_service(service)
        .oneshot(json_request("POST", "/api/verify", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["data"]["fieldResults"][2]["score"], json!(80));
}

#[tokio::test]
async fn verify_route_applies_request_rules() {
    let (service, _) = build_service();
    let body = json!({
        "candidateData": candidate(),
        "verificationRules": {
            "experience": { "minimumYears": 10 },
            "skills": { "requiredSkills": ["Rust"], "bonusSkills": [] }
        }
    });

    let response = router_with_service(service)
        .oneshot(json_request("POST", "/api/verify", &body))
        .await
        .expect("route executes");

    let payload = read_json_body(response).await;
    let fields = &payload["data"]["fieldResults"];
    assert_eq!(fields[0]["score"], json!(100));
    assert_eq!(fields[2]["status"], json!("warning"));
    assert_eq!(fields[2]["score"], json!(50));
    assert_eq!(fields[3]["score"], json!(20));
    assert_eq!(payload["data"]["status"], json!("warning"));
}

#[tokio::test]
async fn verify_route_requires_candidate_data() {
    let (service, _) = build_service();

    let response = router_with_service(service)
        .oneshot(json_request("POST", "/api/verify", &json!({})))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({ "success": false, "error": "Candidate data is required" })
    );
}

#[tokio::test]
async fn verify_route_rejects_malformed_bodies() {
    let (service, _) = build_service();
    let mut body = json!({ "candidateData": candidate() });
    body["candidateData"]["experience"] = json!(-3);

    let response = router_with_service(service)
        .oneshot(json_request("POST", "/api/verify", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("Invalid request body"));
}

#[tokio::test]
async fn verify_route_hides_verifier_faults() {
    let service = CandidateVerificationService::new(
        Arc::new(InMemoryApplicationStore::default()),
        Arc::new(VerificationOrchestrator::new(
            Arc::new(OfflineVerifier),
            ThresholdPolicy::CountAware,
        )),
    );

    let response = router_with_service(service)
        .oneshot(json_request(
            "POST",
            "/api/verify",
            &json!({ "candidateData": candidate() }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        json!("Internal server error during verification")
    );
    assert!(!payload.to_string().contains("identity provider"));
}

#[tokio::test]
async fn save_then_fetch_round_trips_the_application() {
    let verification = verified_result().await;
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/save",
            &json!({
                "candidateData": candidate(),
                "verificationResult": verification,
                "additionalAnswers": answers(),
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let saved = read_json_body(response).await;
    assert_eq!(saved["message"], json!("Application saved successfully"));
    let application_id = saved["data"]["applicationId"]
        .as_str()
        .expect("application id")
        .to_string();
    let saved_application = saved["data"]["savedApplication"].clone();
    assert_eq!(saved_application["id"], json!(application_id));
    assert_eq!(saved_application["status"], json!("passed"));
    assert_eq!(saved_application["verificationResult"], verification);
    assert_eq!(saved_application["additionalAnswers"], answers());

    let response = router
        .oneshot(get_request(&format!("/api/save?id={application_id}")))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let fetched = read_json_body(response).await;
    assert_eq!(fetched["data"], saved_application);
}

#[tokio::test]
async fn save_route_requires_every_part() {
    let (service, store) = build_service();

    let response = router_with_service(service)
        .oneshot(json_request(
            "POST",
            "/api/save",
            &json!({ "candidateData": candidate(), "additionalAnswers": answers() }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({ "success": false, "error": "Missing required data" })
    );
    assert!(store.list().expect("store readable").is_empty());
}

#[tokio::test]
async fn save_route_reports_store_failures_generically() {
    let verification = verified_result().await;
    let service = CandidateVerificationService::new(
        Arc::new(UnavailableStore),
        Arc::new(VerificationOrchestrator::new(
            Arc::new(PassThroughVerifier),
            ThresholdPolicy::CountAware,
        )),
    );

    let response = router_with_service(service)
        .oneshot(json_request(
            "POST",
            "/api/save",
            &json!({
                "candidateData": candidate(),
                "verificationResult": verification,
                "additionalAnswers": answers(),
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("Internal server error while saving"));
}

#[tokio::test]
async fn fetch_route_returns_not_found_for_unknown_ids() {
    let (service, _) = build_service();

    let response = router_with_service(service)
        .oneshot(get_request("/api/save?id=missing"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({ "success": false, "error": "Application not found" })
    );
}

#[tokio::test]
async fn fetch_route_rejects_malformed_queries_with_the_envelope() {
    let (service, _) = build_service();

    let response = router_with_service(service)
        .oneshot(get_request("/api/save?id=a&id=b"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({ "success": false, "error": "Invalid request body" })
    );
}

#[tokio::test]
async fn fetch_route_lists_newest_first() {
    let (service, _) = build_service();
    let verification = service
        .verify(&candidate(), None)
        .await
        .expect("verification runs");

    let mut older = candidate();
    older.full_name = "Ada Older".to_string();
    let mut newer = candidate();
    newer.full_name = "Grace Newer".to_string();

    service
        .save_at(
            older,
            verification.clone(),
            AdditionalAnswers::new(),
            Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        )
        .expect("save older");
    service
        .save_at(
            newer,
            verification,
            AdditionalAnswers::new(),
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        )
        .expect("save newer");

    let response = router_with_service(service)
        .oneshot(get_request("/api/save"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let names: Vec<&str> = payload["data"]
        .as_array()
        .expect("list payload")
        .iter()
        .map(|record| record["candidateData"]["fullName"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Grace Newer", "Ada Older"]);
}

#[tokio::test]
async fn fetch_route_reports_store_failures_generically() {
    let service = CandidateVerificationService::new(
        Arc::new(UnavailableStore),
        Arc::new(VerificationOrchestrator::new(
            Arc::new(PassThroughVerifier),
            ThresholdPolicy::CountAware,
        )),
    );

    let response = router_with_service(service)
        .oneshot(get_request("/api/save"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        json!("Internal server error while retrieving")
    );
}

#[tokio::test]
async fn questions_route_lists_the_questionnaire() {
    let (service, _) = build_service();

    let response = router_with_service(service)
        .oneshot(
            Request::builder()
                .uri("/api/questions")
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let questions = payload["data"].as_array().expect("questions");
    assert_eq!(questions.len(), 6);
    assert_eq!(questions[0]["id"], json!("availability"));
    assert_eq!(questions[5]["required"], json!(false));
}
