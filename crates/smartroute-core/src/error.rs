use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Structured field-level errors returned by the backend, e.g.
/// `{"username": ["A user with that username already exists."]}`.
///
/// The map is kept intact through the gateway boundary so callers can branch
/// on specific fields; flattening to a display string only happens at the
/// final render step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flatten all field messages into a single human-readable string.
    pub fn flatten(&self) -> String {
        self.0
            .values()
            .flat_map(|messages| messages.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flatten())
    }
}

/// Failure taxonomy for all remote calls.
///
/// Gateways never retry; each kind is preserved so the UI (or a test) can
/// branch on it before turning it into display text.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failed before any usable response arrived.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Credentials rejected or the stored session token is no longer valid.
    #[error("authentication rejected: {0}")]
    Auth(String),

    /// The backend returned structured field-level validation errors.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The remote AI call failed or the server reported an internal error.
    #[error("generation failed: {0}")]
    Generation(String),

    /// The response body did not match the expected schema.
    #[error("unexpected response payload: {0}")]
    Decode(String),
}

impl ApiError {
    /// Single human-readable message for the status banner.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Network(err) => format!("Connection failed: {err}"),
            ApiError::Auth(message) => message.clone(),
            ApiError::Validation(errors) => errors.flatten(),
            ApiError::Generation(message) => message.clone(),
            ApiError::Decode(message) => format!("Unexpected server response: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_flatten_in_field_order() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "password".to_string(),
            vec!["This field may not be blank.".to_string()],
        );
        fields.insert(
            "username".to_string(),
            vec!["A user with that username already exists.".to_string()],
        );

        let errors = ValidationErrors(fields);
        assert_eq!(
            errors.flatten(),
            "This field may not be blank. A user with that username already exists."
        );
    }

    #[test]
    fn display_message_is_never_empty_for_populated_kinds() {
        let auth = ApiError::Auth("Invalid username or password.".to_string());
        assert!(!auth.display_message().is_empty());

        let decode = ApiError::Decode("missing field `result`".to_string());
        assert!(decode.display_message().contains("missing field `result`"));
    }
}
