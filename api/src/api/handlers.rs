//! HTTP handlers.
//!
//! Handlers are thin: each one lifts the transport inputs (headers, body
//! bytes) into a [`RawRequest`] and an optional token, runs one synchronous
//! pipeline on the blocking pool, and renders the result. No handler
//! inspects the payload itself.
//!
//! # Token extraction
//!
//! The token is read from `x-access-token`, falling back to an
//! `Authorization: Bearer <token>` header.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{
        HeaderMap, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};

use fintake::control::{Maybe, Outcome};
use fintake::pipeline::{self, FinancialSchema, PipelineContext, PipelineError};
use fintake::validation::RawRequest;

use super::dto::{
    DirectoryResponse, FinancialInfoResponse, FinancialSubmissionResponse, LoginResponse,
    OwnRecordResponse, PersonalSubmissionResponse, RegisterResponse,
};
use super::error::ApiErrorResponse;

/// Header carrying the bearer token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

const BEARER_SCHEME: &str = "Bearer";

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Collaborators for every pipeline.
    pub context: PipelineContext,
}

impl AppState {
    /// Creates a new `AppState` around an assembled context.
    #[must_use]
    pub const fn new(context: PipelineContext) -> Self {
        Self { context }
    }
}

// =============================================================================
// Request Lifting
// =============================================================================

/// Extracts the access token, if any.
///
/// Blank header values count as absent. The `Bearer` scheme name is matched
/// case-insensitively.
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let header_text = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    header_text(ACCESS_TOKEN_HEADER)
        .or_else(|| {
            header_text(AUTHORIZATION.as_str()).and_then(|value| {
                let (scheme, token) = value.split_once(' ')?;
                scheme.eq_ignore_ascii_case(BEARER_SCHEME).then_some(token.trim())
            })
        })
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn raw_request(headers: &HeaderMap, body: &Bytes) -> RawRequest {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    RawRequest::new(content_type, body.to_vec())
}

/// Runs a pipeline on the blocking pool and lifts its failure into a response.
async fn run_pipeline<T, F>(pipeline: F) -> Result<T, ApiErrorResponse>
where
    T: Send + 'static,
    F: FnOnce() -> Outcome<T, PipelineError> + Send + 'static,
{
    match tokio::task::spawn_blocking(pipeline).await {
        Ok(outcome) => outcome.into_result().map_err(ApiErrorResponse::from),
        Err(error) => {
            tracing::error!(%error, "pipeline task did not complete");
            Err(ApiErrorResponse::internal_error("Error interno del servidor"))
        }
    }
}

// =============================================================================
// Accounts
// =============================================================================

/// `POST /registro`
///
/// # Response
///
/// - **201 Created**: `{"mensaje": "Usuario registrado exitosamente", "id": ...}`
/// - **400 Bad Request**: malformed body, missing or non-text credentials,
///   email already registered
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for any pipeline failure.
pub async fn register_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiErrorResponse> {
    let request = raw_request(&headers, &body);
    let context = state.context;

    let registration = run_pipeline(move || pipeline::register(&context, &request)).await?;
    Ok((StatusCode::CREATED, Json(registration.into())))
}

/// `POST /login`
///
/// # Response
///
/// - **200 OK**: `{"mensaje": "Login exitoso", "token": ...}`
/// - **401 Unauthorized**: unknown email or wrong password, indistinguishably
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for any pipeline failure.
pub async fn login_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<LoginResponse>, ApiErrorResponse> {
    let request = raw_request(&headers, &body);
    let context = state.context;

    let session = run_pipeline(move || pipeline::login(&context, &request)).await?;
    Ok(Json(session.into()))
}

// =============================================================================
// Financial Profiles
// =============================================================================

async fn submit_financial_with(
    state: AppState,
    headers: &HeaderMap,
    body: &Bytes,
    schema: FinancialSchema,
) -> Result<Json<FinancialSubmissionResponse>, ApiErrorResponse> {
    let token = access_token(headers);
    let request = raw_request(headers, body);
    let context = state.context;

    let submission = run_pipeline(move || {
        pipeline::submit_financial(&context, token.as_deref(), &request, schema)
    })
    .await?;
    Ok(Json(submission.into()))
}

/// `POST /info_financiera`
///
/// Creates the caller's financial profile or replaces it.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] with 401 for token failures and 400 for
/// structural or validation failures.
pub async fn submit_financial_info(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<FinancialSubmissionResponse>, ApiErrorResponse> {
    submit_financial_with(state, &headers, &body, FinancialSchema::Primary).await
}

/// `POST /info_financiera/legacy`
///
/// Same as [`submit_financial_info`] for the desktop client's field names
/// and currency-formatted numbers.
///
/// # Errors
///
/// See [`submit_financial_info`].
pub async fn submit_legacy_financial_info(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<FinancialSubmissionResponse>, ApiErrorResponse> {
    submit_financial_with(state, &headers, &body, FinancialSchema::Legacy).await
}

/// `GET /obtener_info_financiera`
///
/// # Response
///
/// - **200 OK**: the stored profile
/// - **404 Not Found**: `{"mensaje": ..., "info_financiera": null}`
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] with 401 for token failures.
pub async fn get_financial_info(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<FinancialInfoResponse>), ApiErrorResponse> {
    let token = access_token(&headers);
    let context = state.context;

    let found =
        run_pipeline(move || pipeline::fetch_financial(&context, token.as_deref())).await?;
    Ok(match found {
        Maybe::Some(profile) => (StatusCode::OK, Json(FinancialInfoResponse::found(profile))),
        Maybe::None => (StatusCode::NOT_FOUND, Json(FinancialInfoResponse::not_found())),
    })
}

// =============================================================================
// Personal Records
// =============================================================================

/// `POST /info_personal`
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] with 401 for token failures and 400 for an
/// empty, non-object or mistyped body.
pub async fn submit_personal_info(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PersonalSubmissionResponse>, ApiErrorResponse> {
    let token = access_token(&headers);
    let request = raw_request(&headers, &body);
    let context = state.context;

    let id = run_pipeline(move || {
        pipeline::submit_personal(&context, token.as_deref(), &request)
    })
    .await?;
    Ok(Json(PersonalSubmissionResponse::stored(id)))
}

/// `GET /obtener_info_personal`
///
/// Lists the caller's own records.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] with 401 for token failures.
pub async fn list_personal_info(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<OwnRecordResponse>>, ApiErrorResponse> {
    let token = access_token(&headers);
    let context = state.context;

    let records =
        run_pipeline(move || pipeline::list_personal(&context, token.as_deref())).await?;
    Ok(Json(records.into_iter().map(OwnRecordResponse::from).collect()))
}

/// `GET /todas_personas`
///
/// Public listing of every record with its owner's email.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] with 500 if the records cannot be read.
pub async fn list_all_people(
    State(state): State<AppState>,
) -> Result<Json<DirectoryResponse>, ApiErrorResponse> {
    let context = state.context;

    let entries = run_pipeline(move || pipeline::list_all_personal(&context)).await?;
    Ok(Json(entries.into()))
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check endpoint.
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Tests
// =============================================================================
