//! Common test helpers for API integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, and not every file uses every
//! helper.

#![allow(dead_code)]

use std::sync::Arc;

use argon2::{Algorithm, Argon2, Params, Version};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use fintake::auth::SigningKey;
use fintake::pipeline::PipelineContext;
use fintake_api::api::{ACCESS_TOKEN_HEADER, AppState, router};
use fintake_api::infrastructure::{Argon2Hasher, Hs256Codec, Repositories};

pub const TEST_SECRET: &[u8] = b"endpoint-test-secret";

// =============================================================================
// Application Construction
// =============================================================================

/// Argon2id with minimal cost so tests stay fast in debug builds.
pub fn cheap_hasher() -> Argon2Hasher {
    let params = Params::new(1024, 1, 1, None).unwrap();
    Argon2Hasher::with_argon2(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

pub fn signing_key() -> SigningKey {
    SigningKey::new(TEST_SECRET.to_vec())
}

/// Context over `repositories` with the production codec and a cheap hasher.
pub fn test_context(repositories: Repositories) -> PipelineContext {
    PipelineContext::new(
        repositories.identities,
        repositories.financial_profiles,
        repositories.personal_records,
        Arc::new(cheap_hasher()),
        Arc::new(Hs256Codec::new()),
        signing_key(),
    )
}

pub fn app_with(repositories: Repositories) -> Router {
    router(AppState::new(test_context(repositories)))
}

pub fn app() -> Router {
    app_with(Repositories::in_memory())
}

// =============================================================================
// Requests
// =============================================================================

pub fn post_json(uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    let builder = match token {
        Some(token) => builder.header(ACCESS_TOKEN_HEADER, token),
        None => builder,
    };
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let builder = Request::get(uri);
    let builder = match token {
        Some(token) => builder.header(ACCESS_TOKEN_HEADER, token),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}

/// Sends `request` and decodes the JSON body (`Null` when empty).
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Registers `email` and returns a fresh token for it.
pub async fn register_and_login(router: &Router, email: &str, password: &str) -> String {
    let credentials = serde_json::json!({"email": email, "password": password});

    let (status, _) = send(router, post_json("/registro", &credentials, None)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(router, post_json("/login", &credentials, None)).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

/// A complete primary-schema financial payload.
pub fn financial_payload() -> Value {
    serde_json::json!({
        "fuente_principal": "empleo",
        "ingreso_mensual": 3_000_000,
        "arriendo_hipoteca": 800_000,
        "servicios": 300_000,
        "alimentacion": 500_000,
        "transporte": 200_000,
        "otros_gastos_fijos": 100_000
    })
}
