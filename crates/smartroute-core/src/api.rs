//! HTTP gateways for the SmartRoute backend.
//!
//! Four concerns share one client: authentication (`/login/`, `/register/`),
//! AI generation (`/ai/prospect/`, `/ai/route/`) and saved-route persistence
//! (`/routes/`). Every response body passes through an explicit serde schema;
//! a mismatch surfaces as [`ApiError::Decode`] instead of leaking an
//! unvalidated structure into display code. Gateways never retry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, ValidationErrors};
use crate::params::{RouteParams, SearchParams};
use crate::session::Credential;

/// Authorization scheme the backend's token auth expects.
const AUTH_SCHEME: &str = "Token";

/// Markdown narrative plus any location references returned by an AI request.
///
/// Immutable once produced; the controller replaces it wholesale on the next
/// successful request and clears it on navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: String,
    pub locations: Vec<LocationReference>,
}

/// A single place citation associated with a generation result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationReference {
    pub title: String,
    pub uri: String,
    #[serde(default)]
    pub review: Option<String>,
}

/// Read-only copy of a persisted route, owned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SavedRouteSummary {
    pub id: i64,
    pub title: String,
    pub route_data: String,
    pub created_at: DateTime<Utc>,
}

/// Client for all SmartRoute backend calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange credentials for a session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential, ApiError> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            username: &'a str,
            password: &'a str,
        }

        #[derive(Deserialize)]
        struct LoginResponse {
            token: String,
        }

        debug!(username, "posting login request");
        let response = self
            .http
            .post(self.endpoint("/login/"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: LoginResponse = decode_body(response).await?;
        Ok(Credential::new(body.token))
    }

    /// Create a new account. The caller composes register-then-login to get
    /// "create account and sign in" semantics; there is no atomicity between
    /// the two round trips.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct RegisterRequest<'a> {
            username: &'a str,
            password: &'a str,
        }

        debug!(username, "posting registration request");
        let response = self
            .http
            .post(self.endpoint("/register/"))
            .json(&RegisterRequest { username, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        // The confirmation payload only echoes account fields; nothing to keep.
        Ok(())
    }

    /// Request a prospecting list. The server performs all ranking and text
    /// generation; this is a single request/response.
    pub async fn find_prospects(
        &self,
        credential: &Credential,
        params: &SearchParams,
    ) -> Result<GenerationResult, ApiError> {
        #[derive(Serialize)]
        struct ProspectRequest<'a> {
            #[serde(rename = "businessType")]
            business_type: &'a str,
            location: &'a str,
            count: u32,
        }

        debug!(
            business_type = %params.business_type,
            location = %params.location,
            count = params.count.value(),
            "posting prospect request"
        );
        let response = self
            .http
            .post(self.endpoint("/ai/prospect/"))
            .header("Authorization", format!("{AUTH_SCHEME} {}", credential.as_str()))
            .json(&ProspectRequest {
                business_type: &params.business_type,
                location: &params.location,
                count: params.count.value(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        decode_generation(response).await
    }

    /// Request an optimized ordering for the given addresses. The server owns
    /// all route ordering; the client only guarantees ≥2 addresses.
    pub async fn optimize_route(
        &self,
        credential: &Credential,
        params: &RouteParams,
    ) -> Result<GenerationResult, ApiError> {
        #[derive(Serialize)]
        struct RouteRequest<'a> {
            addresses: &'a [String],
        }

        debug!(stops = params.addresses().len(), "posting route request");
        let response = self
            .http
            .post(self.endpoint("/ai/route/"))
            .header("Authorization", format!("{AUTH_SCHEME} {}", credential.as_str()))
            .json(&RouteRequest {
                addresses: params.addresses(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        decode_generation(response).await
    }

    /// Persist a generated route under the given title.
    pub async fn save_route(
        &self,
        credential: &Credential,
        title: &str,
        route_data: &str,
    ) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct SaveRequest<'a> {
            title: &'a str,
            route_data: &'a str,
        }

        debug!(title, "saving route");
        let response = self
            .http
            .post(self.endpoint("/routes/"))
            .header("Authorization", format!("{AUTH_SCHEME} {}", credential.as_str()))
            .json(&SaveRequest { title, route_data })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(())
    }

    /// Fetch the caller's saved routes. Ordering is defined by the server
    /// (reverse-chronological); the client keeps a read-only cached copy.
    pub async fn list_saved_routes(
        &self,
        credential: &Credential,
    ) -> Result<Vec<SavedRouteSummary>, ApiError> {
        debug!("listing saved routes");
        let response = self
            .http
            .get(self.endpoint("/routes/"))
            .header("Authorization", format!("{AUTH_SCHEME} {}", credential.as_str()))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        decode_body(response).await
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    result: String,
    #[serde(default)]
    locations: Vec<LocationReference>,
}

async fn decode_generation(response: reqwest::Response) -> Result<GenerationResult, ApiError> {
    let body: GenerateResponse = decode_body(response).await?;
    Ok(GenerationResult {
        text: body.result,
        locations: body.locations,
    })
}

/// Read a successful response body through a typed schema.
async fn decode_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let raw = response.text().await?;
    serde_json::from_str(&raw).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Convert a non-success response into the structured error taxonomy.
async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    classify_error(status, &body)
}

fn classify_error(status: reqwest::StatusCode, body: &str) -> ApiError {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| value.get("detail").and_then(Value::as_str).map(String::from))
            .unwrap_or_else(|| "Invalid credentials or expired session.".to_string());
        return ApiError::Auth(detail);
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        // `{"error": "..."}` is how the AI endpoints report failures.
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return ApiError::Generation(message.to_string());
        }

        // A bad request with an object of field -> [messages] is a
        // serializer validation failure; keep the structure intact. The token
        // endpoint rejects bad credentials as 400 with only a
        // `non_field_errors` key, which is an authentication failure, not a
        // form-field problem.
        if status == reqwest::StatusCode::BAD_REQUEST {
            if let Some(fields) = validation_fields(&value) {
                if let Some(messages) = fields.0.get("non_field_errors") {
                    return ApiError::Auth(messages.join(" "));
                }
                return ApiError::Validation(fields);
            }
        }
    }

    ApiError::Generation(format!("Server returned {status}"))
}

fn validation_fields(value: &Value) -> Option<ValidationErrors> {
    let object = value.as_object()?;
    let mut errors = ValidationErrors::default();
    for (field, messages) in object {
        let list = match messages {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect::<Vec<_>>(),
            Value::String(message) => vec![message.clone()],
            _ => return None,
        };
        errors.0.insert(field.clone(), list);
    }
    if errors.is_empty() { None } else { Some(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn generation_payload_decodes_without_locations() {
        let body: GenerateResponse = serde_json::from_str(r#"{"result": "**ok**"}"#).unwrap();
        assert_eq!(body.result, "**ok**");
        assert!(body.locations.is_empty());
    }

    #[test]
    fn generation_payload_decodes_location_references() {
        // The narrative can open with a markdown heading, so the quoted value
        // contains `"#` sequences; the delimiter has to be wider than that.
        let raw = r###"{
            "result": "## Rota",
            "locations": [
                {"title": "Padaria Central", "uri": "https://maps.example/1"},
                {"title": "Café Azul", "uri": "https://maps.example/2", "review": "Ótimo café."}
            ]
        }"###;
        let body: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(body.locations.len(), 2);
        assert_eq!(body.locations[0].review, None);
        assert_eq!(body.locations[1].review.as_deref(), Some("Ótimo café."));
    }

    #[test]
    fn saved_route_payload_decodes_created_at() {
        let raw = r#"[{
            "id": 7,
            "title": "Rota - 12/05/2025",
            "route_data": "1. Rua X\n2. Rua Y",
            "created_at": "2025-05-12T14:30:00Z"
        }]"#;
        let routes: Vec<SavedRouteSummary> = serde_json::from_str(raw).unwrap();
        assert_eq!(routes[0].id, 7);
        assert_eq!(routes[0].created_at.to_rfc3339(), "2025-05-12T14:30:00+00:00");
    }

    #[test]
    fn unauthorized_maps_to_auth_error() {
        let err = classify_error(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": "Invalid token."}"#,
        );
        match err {
            ApiError::Auth(message) => assert_eq!(message, "Invalid token."),
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[test]
    fn rejected_credentials_map_to_auth_error() {
        let err = classify_error(
            StatusCode::BAD_REQUEST,
            r#"{"non_field_errors": ["Unable to log in with provided credentials."]}"#,
        );
        match err {
            ApiError::Auth(message) => {
                assert_eq!(message, "Unable to log in with provided credentials.");
            }
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[test]
    fn field_map_maps_to_validation_error() {
        let err = classify_error(
            StatusCode::BAD_REQUEST,
            r#"{"username": ["A user with that username already exists."]}"#,
        );
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(
                    errors.flatten(),
                    "A user with that username already exists."
                );
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn error_object_maps_to_generation_error() {
        let err = classify_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "model unavailable"}"#,
        );
        match err {
            ApiError::Generation(message) => assert_eq!(message, "model unavailable"),
            other => panic!("expected Generation, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_body_falls_back_to_status_text() {
        let err = classify_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        match err {
            ApiError::Generation(message) => assert!(message.contains("502")),
            other => panic!("expected Generation, got {other:?}"),
        }
    }
}
