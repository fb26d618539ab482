//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ApiErrorResponse};
pub use handlers::{
    ACCESS_TOKEN_HEADER, AppState, HealthResponse, access_token, get_financial_info, health_check,
    list_all_people, list_personal_info, login_user, register_user, submit_financial_info,
    submit_legacy_financial_info, submit_personal_info,
};
pub use routes::router;
