use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Method not allowed: {method}")]
    MethodNotAllowed { method: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Form parse error: {0}")]
    FormParse(String),

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Result parse error: {0}")]
    ResultParse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Message returned when a required form field is absent.
pub const MISSING_FIELDS: &str = "Missing required fields";

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn form_parse(msg: impl Into<String>) -> Self {
        Self::FormParse(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn result_parse(msg: impl Into<String>) -> Self {
        Self::ResultParse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status the analyze endpoint answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            // Malformed multipart bodies answer 500, not 400.
            Self::FormParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `error` field of the JSON error body.
    ///
    /// Downstream failures are reported generically; their details only go to the logs.
    pub fn client_message(&self) -> String {
        match self {
            Self::MethodNotAllowed { .. } => "Method Not Allowed".to_string(),
            Self::Validation(msg) => msg.clone(),
            Self::FormParse(_) => "Error parsing form data".to_string(),
            _ => "Internal Server Error".to_string(),
        }
    }
}
