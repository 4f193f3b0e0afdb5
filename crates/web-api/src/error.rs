use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lotto_stats_core::EngineError;
use lotto_stats_data::HistoryError;
use serde_json::json;
use thiserror::Error;

/// Request failures, rendered as `{ "ok": false, "error": ... }`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InsufficientData { .. } => Self::Unprocessable(err.to_string()),
            EngineError::InvalidConfig(_) | EngineError::InvalidRecord(_) => {
                Self::BadRequest(err.to_string())
            }
        }
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NotFound(_) => Self::NotFound(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(json!({ "ok": false, "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn engine_errors_map_to_client_statuses() {
        let insufficient = ApiError::from(EngineError::InsufficientData {
            required: 3,
            available: 1,
        });
        assert_eq!(insufficient.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            ApiError::from(EngineError::config("bad")).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_history_is_not_found() {
        let err = ApiError::from(HistoryError::NotFound(PathBuf::from("x.json")));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
