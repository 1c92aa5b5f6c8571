use ballie_core::error::CoreError;
use ballie_core::validation::FieldErrors;
use serde::Deserialize;

/// Errors from the REST client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Ballie API error ({status}): {body}")]
    Status {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid API URL '{0}'")]
    InvalidUrl(String),
}

/// The JSON error body produced by `ballie-api`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    fields: Option<FieldErrors>,
}

impl ClientError {
    /// Collapse into the taxonomy list views understand.
    ///
    /// - 404 becomes `NotFound` for `entity`/`id`.
    /// - 400 with a `fields` map becomes `Validation`.
    /// - Anything else becomes `Collaborator`.
    pub fn into_core(self, entity: &'static str, id: &str) -> CoreError {
        match self {
            ClientError::Status { status: 404, .. } => CoreError::not_found(entity, id),
            ClientError::Status { status: 400, ref body } => {
                match serde_json::from_str::<ErrorBody>(body) {
                    Ok(ErrorBody {
                        fields: Some(fields),
                        ..
                    }) if !fields.is_empty() => CoreError::Validation(fields),
                    Ok(parsed) if !parsed.error.is_empty() => CoreError::Collaborator(parsed.error),
                    _ => CoreError::Collaborator(self.to_string()),
                }
            }
            other => CoreError::Collaborator(other.to_string()),
        }
    }
}
