//! End-to-end scenarios for the candidate verification wizard.
//!
//! Everything goes through the public service facade and HTTP router: a
//! candidate is verified, the questionnaire is answered, the application is
//! saved, and it is read back.

mod common {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::response::Response;
    use serde_json::{json, Value};

    use candidate_verifier::workflows::candidate::{
        verification_router, CandidateVerificationService, InMemoryApplicationStore,
        PassThroughVerifier, SimulatedVerifier, ThresholdPolicy, VerificationOrchestrator,
    };

    pub(super) fn candidate_json() -> Value {
        json!({
            "fullName": "Jane Doe",
            "email": "jane@gmail.com",
            "phone": "+1 (555) 123-4567",
            "experience": 5,
            "skills": "JavaScript, React, Node.js, TypeScript",
            "education": "Bachelor's Degree",
            "address": "123 Main St, Springfield, IL 62704"
        })
    }

    pub(super) fn answers_json() -> Value {
        json!({
            "availability": "Immediately",
            "salaryExpectation": "$95,000",
            "workLocation": "Remote",
            "workSchedule": "Full-time",
            "motivation": "The team ships carefully",
            "additionalInfo": "Happy to relocate"
        })
    }

    pub(super) fn router() -> axum::Router {
        let orchestrator =
            VerificationOrchestrator::new(Arc::new(PassThroughVerifier), ThresholdPolicy::CountAware);
        verification_router(Arc::new(CandidateVerificationService::new(
            Arc::new(InMemoryApplicationStore::default()),
            Arc::new(orchestrator),
        )))
    }

    pub(super) fn simulated_router(seed: u64) -> axum::Router {
        let orchestrator = VerificationOrchestrator::new(
            Arc::new(SimulatedVerifier::new(Some(seed))),
            ThresholdPolicy::CountAware,
        );
        verification_router(Arc::new(CandidateVerificationService::new(
            Arc::new(InMemoryApplicationStore::default()),
            Arc::new(orchestrator),
        )))
    }

    pub(super) fn post(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request")
    }

    pub(super) fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("build request")
    }

    pub(super) async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }
}

use axum::http::StatusCode;
use candidate_verifier::workflows::candidate::{validate_answers, AdditionalAnswers};
use common::*;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn candidate_is_verified_saved_and_retrieved() {
    let router = router();

    let response = router
        .clone()
        .oneshot(post("/api/verify", &json!({ "candidateData": candidate_json() })))
        .await
        .expect("verify route");
    assert_eq!(response.status(), StatusCode::OK);
    let verification = json_body(response).await["data"].clone();
    assert_eq!(verification["overallScore"], 91);
    assert_eq!(verification["status"], "passed");
    assert_eq!(
        verification["summary"],
        "Verification completed successfully. 6 out of 6 fields verified with high confidence."
    );

    let answers: AdditionalAnswers =
        serde_json::from_value(answers_json()).expect("answers deserialize");
    assert!(validate_answers(&answers).is_ok());

    let response = router
        .clone()
        .oneshot(post(
            "/api/save",
            &json!({
                "candidateData": candidate_json(),
                "verificationResult": verification,
                "additionalAnswers": answers_json(),
            }),
        ))
        .await
        .expect("save route");
    assert_eq!(response.status(), StatusCode::OK);
    let saved = json_body(response).await;
    let id = saved["data"]["applicationId"]
        .as_str()
        .expect("application id")
        .to_string();

    let response = router
        .clone()
        .oneshot(get(&format!("/api/save?id={id}")))
        .await
        .expect("fetch route");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = json_body(response).await;
    assert_eq!(fetched["data"], saved["data"]["savedApplication"]);
    assert_eq!(fetched["data"]["candidateData"]["fullName"], "Jane Doe");
    assert_eq!(fetched["data"]["additionalAnswers"]["additionalInfo"], "Happy to relocate");

    let response = router.oneshot(get("/api/save")).await.expect("list route");
    let listed = json_body(response).await;
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn weak_candidate_fails_verification() {
    let response = router()
        .oneshot(post(
            "/api/verify",
            &json!({
                "candidateData": {
                    "fullName": "Sam Weak",
                    "email": "sam@mailinator.com",
                    "phone": "call me maybe",
                    "experience": "1",
                    "skills": "Excel",
                    "education": "PhD",
                    "address": "Nowhere"
                }
            }),
        ))
        .await
        .expect("verify route");

    assert_eq!(response.status(), StatusCode::OK);
    let data = json_body(response).await["data"].clone();
    let scores: Vec<u64> = data["fieldResults"]
        .as_array()
        .expect("field results")
        .iter()
        .map(|field| field["score"].as_u64().expect("score"))
        .collect();
    assert_eq!(scores, vec![60, 0, 50, 0, 100, 0]);
    assert_eq!(data["overallScore"], 35);
    assert_eq!(data["status"], "failed");
    assert_eq!(
        data["summary"],
        "Verification failed. 3 field(s) could not be verified. Manual investigation required."
    );
}

#[tokio::test]
async fn seeded_simulation_is_stable_across_services() {
    let body = json!({ "candidateData": candidate_json() });

    let first = json_body(
        simulated_router(2024)
            .oneshot(post("/api/verify", &body))
            .await
            .expect("verify route"),
    )
    .await;
    let second = json_body(
        simulated_router(2024)
            .oneshot(post("/api/verify", &body))
            .await
            .expect("verify route"),
    )
    .await;

    assert_eq!(first["data"], second["data"]);
    let overall = first["data"]["overallScore"].as_u64().expect("score");
    assert!((73..=91).contains(&overall));
}
