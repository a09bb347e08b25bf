use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::domain::{
    AdditionalAnswers, ApplicationId, CandidateData, SavedApplication, VerificationResult,
};
use super::evaluation::VerificationRules;
use super::questionnaire::QUESTIONS;
use super::repository::ApplicationStore;
use super::service::{CandidateVerificationService, VerificationServiceError};
use super::verifier::ExternalVerifier;

pub const INVALID_BODY: &str = "Invalid request body";
pub const CANDIDATE_REQUIRED: &str = "Candidate data is required";
pub const MISSING_REQUIRED_DATA: &str = "Missing required data";
pub const APPLICATION_NOT_FOUND: &str = "Application not found";

/// Uniform JSON envelope returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

fn respond<T: Serialize>(status: StatusCode, data: T, message: Option<&'static str>) -> Response {
    let body = ApiResponse {
        success: true,
        data: Some(data),
        error: None,
        message,
    };
    (status, Json(body)).into_response()
}

fn reject(status: StatusCode, error: &'static str) -> Response {
    let body: ApiResponse<()> = ApiResponse {
        success: false,
        data: None,
        error: Some(error),
        message: None,
    };
    (status, Json(body)).into_response()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub candidate_data: Option<CandidateData>,
    pub verification_rules: Option<VerificationRules>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub candidate_data: Option<CandidateData>,
    pub verification_result: Option<VerificationResult>,
    pub additional_answers: Option<AdditionalAnswers>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPayload {
    pub application_id: ApplicationId,
    pub saved_application: SavedApplication,
}

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    pub id: Option<String>,
}

/// Router builder exposing the verification and application endpoints.
pub fn verification_router<S, V>(service: Arc<CandidateVerificationService<S, V>>) -> Router
where
    S: ApplicationStore + 'static,
    V: ExternalVerifier + 'static,
{
    Router::new()
        .route("/api/verify", post(verify_handler::<S, V>))
        .route(
            "/api/save",
            post(save_handler::<S, V>).get(fetch_handler::<S, V>),
        )
        .route("/api/questions", get(questions_handler))
        .with_state(service)
}

pub(crate) async fn verify_handler<S, V>(
    State(service): State<Arc<CandidateVerificationService<S, V>>>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Response
where
    S: ApplicationStore + 'static,
    V: ExternalVerifier + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "rejected verification payload");
            return reject(StatusCode::BAD_REQUEST, INVALID_BODY);
        }
    };

    let Some(candidate) = request.candidate_data else {
        return reject(StatusCode::BAD_REQUEST, CANDIDATE_REQUIRED);
    };

    match service
        .verify(&candidate, request.verification_rules.as_ref())
        .await
    {
        Ok(result) => respond(
            StatusCode::OK,
            result,
            Some("Verification completed successfully"),
        ),
        Err(err) => {
            error!(error = %err, "verification failed");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error during verification",
            )
        }
    }
}

pub(crate) async fn save_handler<S, V>(
    State(service): State<Arc<CandidateVerificationService<S, V>>>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Response
where
    S: ApplicationStore + 'static,
    V: ExternalVerifier + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "rejected save payload");
            return reject(StatusCode::BAD_REQUEST, INVALID_BODY);
        }
    };

    let (Some(candidate), Some(verification), Some(answers)) = (
        request.candidate_data,
        request.verification_result,
        request.additional_answers,
    ) else {
        return reject(StatusCode::BAD_REQUEST, MISSING_REQUIRED_DATA);
    };

    match service.save(candidate, verification, answers) {
        Ok(saved) => respond(
            StatusCode::OK,
            SavedPayload {
                application_id: saved.id.clone(),
                saved_application: saved,
            },
            Some("Application saved successfully"),
        ),
        Err(err) => {
            error!(error = %err, "saving application failed");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error while saving",
            )
        }
    }
}

pub(crate) async fn fetch_handler<S, V>(
    State(service): State<Arc<CandidateVerificationService<S, V>>>,
    query: Result<Query<FetchParams>, QueryRejection>,
) -> Response
where
    S: ApplicationStore + 'static,
    V: ExternalVerifier + 'static,
{
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            warn!(error = %rejection, "rejected application query");
            return reject(StatusCode::BAD_REQUEST, INVALID_BODY);
        }
    };

    let outcome = match params.id.filter(|id| !id.trim().is_empty()) {
        Some(id) => service
            .get(&ApplicationId(id))
            .map(|record| respond(StatusCode::OK, record, None)),
        None => service
            .list()
            .map(|records| respond(StatusCode::OK, records, None)),
    };

    match outcome {
        Ok(response) => response,
        Err(VerificationServiceError::NotFound(_)) => {
            reject(StatusCode::NOT_FOUND, APPLICATION_NOT_FOUND)
        }
        Err(err) => {
            error!(error = %err, "retrieving applications failed");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error while retrieving",
            )
        }
    }
}

pub(crate) async fn questions_handler() -> Response {
    respond(StatusCode::OK, QUESTIONS, None)
}
