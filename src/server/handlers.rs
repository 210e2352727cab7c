use super::types::ErrorResponse;
use crate::{Error, llm::GenerationResult, pipeline::Analyzer};
use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    http::{Method, StatusCode},
    response::Json,
};
use std::sync::Arc;
use tracing::{Instrument, error, info_span, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

pub async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerationResult>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();
    let span = info_span!("analyze", %request_id);

    async move {
        let mut multipart = match multipart {
            Ok(multipart) => multipart,
            Err(rejection) => {
                let e = Error::form_parse(rejection.body_text());
                warn!("Rejected analyze request body: {}", e);
                return Err(ErrorResponse::from_error(&e));
            }
        };

        match state.analyzer.process(&mut multipart).await {
            Ok(result) => Ok(Json(result)),
            Err(e) => {
                if e.status_code().is_server_error() {
                    error!("Failed to process analyze request: {}", e);
                } else {
                    warn!("Rejected analyze request: {}", e);
                }
                Err(ErrorResponse::from_error(&e))
            }
        }
    }
    .instrument(span)
    .await
}

/// Answers every method other than POST on the analyze routes.
pub async fn method_not_allowed(method: Method) -> (StatusCode, Json<ErrorResponse>) {
    let e = Error::MethodNotAllowed {
        method: method.to_string(),
    };
    warn!("{}", e);
    ErrorResponse::from_error(&e)
}
