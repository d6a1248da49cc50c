use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::fixture::FixtureError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("error executing store query")]
    Database(#[from] sqlx::Error),

    #[error("error initializing database")]
    FixtureFetch(#[from] FixtureError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::FixtureFetch(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            // Store internals stay out of client responses.
            AppError::InvalidParameter(_) | AppError::Database(_) => None,
            AppError::FixtureFetch(e) => Some(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let mut body = json!({ "error": self.to_string() });
        if let Some(details) = self.details() {
            body["details"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}
