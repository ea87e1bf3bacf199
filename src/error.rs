use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error surface of the store layer. Everything the repos and the view
/// builder raise collapses into "row absent" or "the store broke".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("row not found")]
    NotFound,
    #[error("inconsistent state: {0}")]
    Inconsistent(&'static str),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Failure codes shared with API clients. The numbering is part of the wire
/// contract; codes the service does not raise itself stay reserved.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailCode {
    Unknown = 10,
    Wrong = 30,
    Invalid = 40,
    NotFound = 50,
    NeedPermission = 60,
    InvalidRequestFormat = 70,
}

impl FailCode {
    pub fn message(self) -> &'static str {
        match self {
            FailCode::Unknown => "unknown failure",
            FailCode::Wrong => "wrong value",
            FailCode::Invalid => "invalid value",
            FailCode::NotFound => "does not exist",
            FailCode::NeedPermission => "permission required",
            FailCode::InvalidRequestFormat => "malformed request",
        }
    }
}

/// Failure envelope returned to clients instead of a success body.
#[derive(Debug, Serialize)]
pub struct FailResp {
    pub fail_code: u16,
    pub message: &'static str,
}

impl FailResp {
    pub fn new(code: FailCode) -> Self {
        Self {
            fail_code: code as u16,
            message: code.message(),
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: FailCode,
}

impl ApiError {
    pub fn unknown() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: FailCode::Unknown,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: FailCode::NotFound,
        }
    }

    pub fn bad_request() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: FailCode::InvalidRequestFormat,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::not_found(),
            StoreError::Inconsistent(what) => {
                tracing::error!(what, "store invariant broken");
                ApiError::unknown()
            }
            StoreError::Db(e) => {
                tracing::error!(error = %e, "store failure");
                ApiError::unknown()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(FailResp::new(self.code))).into_response()
    }
}
