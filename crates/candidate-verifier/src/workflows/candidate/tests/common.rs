use std::future::{ready, Future};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::workflows::candidate::domain::{
    ApplicationId, CandidateData, FieldVerificationResult, SavedApplication,
};
use crate::workflows::candidate::repository::{
    ApplicationStore, InMemoryApplicationStore, RepositoryError,
};
use crate::workflows::candidate::verifier::{ExternalVerifier, PassThroughVerifier, VerifierError};
use crate::workflows::candidate::{
    verification_router, CandidateVerificationService, ThresholdPolicy, VerificationOrchestrator,
};

pub(super) fn candidate() -> CandidateData {
    CandidateData {
        full_name: "Jane Doe".to_string(),
        email: "jane@gmail.com".to_string(),
        phone: "+15551234567".to_string(),
        experience: 5,
        skills: "JavaScript, React, Node.js, TypeScript".to_string(),
        education: "Bachelor's Degree".to_string(),
        current_company: None,
        linkedin_url: None,
        address: "123 Main St, Springfield, IL 62704".to_string(),
    }
}

pub(super) fn orchestrator() -> VerificationOrchestrator<PassThroughVerifier> {
    VerificationOrchestrator::new(Arc::new(PassThroughVerifier), ThresholdPolicy::CountAware)
}

pub(super) fn build_service() -> (
    CandidateVerificationService<InMemoryApplicationStore, PassThroughVerifier>,
    Arc<InMemoryApplicationStore>,
) {
    let store = Arc::new(InMemoryApplicationStore::default());
    let service = CandidateVerificationService::new(store.clone(), Arc::new(orchestrator()));
    (service, store)
}

pub(super) fn router_with_service<S, V>(
    service: CandidateVerificationService<S, V>,
) -> axum::Router
where
    S: ApplicationStore + 'static,
    V: ExternalVerifier + 'static,
{
    verification_router(Arc::new(service))
}

pub(super) fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("build request")
}

pub(super) fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct UnavailableStore;

impl ApplicationStore for UnavailableStore {
    fn put(&self, _record: SavedApplication) -> Result<SavedApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn get(&self, _id: &ApplicationId) -> Result<Option<SavedApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<SavedApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct OfflineVerifier;

impl ExternalVerifier for OfflineVerifier {
    fn verify(
        &self,
        _candidate: &CandidateData,
        _baseline: FieldVerificationResult,
    ) -> impl Future<Output = Result<FieldVerificationResult, VerifierError>> + Send {
        ready(Err(VerifierError::Unavailable(
            "identity provider timed out".to_string(),
        )))
    }
}
