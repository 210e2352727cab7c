use crate::Error;
use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// Status code and uniform JSON body for `error`.
    pub fn from_error(error: &Error) -> (StatusCode, Json<ErrorResponse>) {
        (
            error.status_code(),
            Json(ErrorResponse {
                error: error.client_message(),
            }),
        )
    }
}
