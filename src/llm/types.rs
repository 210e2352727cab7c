use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Base64 image payload tagged with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub data: String,
    pub mime_type: String,
}

impl InlineImage {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Everything the generation service receives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationInput {
    pub prompt: String,
    pub image: InlineImage,
}

/// The structured reply relayed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationResult {
    pub response: String,
}

impl GenerationResult {
    /// Parses raw model output. The text must be a JSON object holding exactly one
    /// non-empty string field `response`; a surrounding markdown code fence is tolerated.
    pub fn parse(raw: &str) -> Result<Self> {
        let body = strip_code_fence(raw.trim());

        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| Error::result_parse(format!("Reply is not valid JSON: {}", e)))?;
        // Derived struct deserialization also accepts a sequence; only an object is valid here.
        if !value.is_object() {
            return Err(Error::result_parse("Reply is not a JSON object"));
        }

        let result: GenerationResult = serde_json::from_value(value).map_err(|e| {
            Error::result_parse(format!("Reply is not the expected JSON object: {}", e))
        })?;

        if result.response.trim().is_empty() {
            return Err(Error::result_parse("Reply has an empty response field"));
        }

        Ok(result)
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = match rest.get(..4) {
        Some(info) if info.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    match rest.strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => text,
    }
}
