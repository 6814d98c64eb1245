//! API failure taxonomy.
//!
//! Every backend or transport failure becomes exactly one `ApiError`
//! variant, and every variant maps through [`ApiError::remedy`] to the one
//! recovery action the presentation layer performs. Pages never inspect
//! status codes; no failure is fatal to the process.

use serde::Deserialize;

/// Errors from backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401 — bad credentials or an expired/invalid token.
    #[error("Not authenticated: {0}")]
    Unauthorized(String),
    /// 403 — the role does not permit this call.
    #[error("Not permitted: {0}")]
    Forbidden(String),
    /// 400/422 — duplicate email, missing field, malformed upload.
    #[error("{0}")]
    Validation(String),
    /// 404 — distinguished from hard failure only by the surfaced message.
    #[error("Not found: {0}")]
    NotFound(String),
    /// Any other non-success status.
    #[error("Backend error (status {status}): {body}")]
    Server { status: u16, body: String },
    /// Could not reach the backend at all.
    #[error("Cannot reach the backend at {0}")]
    Connection(String),
    /// Transport failed mid-request.
    #[error("Network error: {0}")]
    Network(String),
    /// Response body did not match the expected shape.
    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

/// The single recovery action the presentation layer takes for a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remedy {
    /// Clear the session and return to login.
    ForceLogout,
    /// Send the caller to their own home; never expose the target's data.
    RedirectHome,
    /// Inline message; form state preserved for correction.
    ShowMessage(String),
    /// Transient toast; prior state unchanged, user may retry manually.
    RetryToast(String),
}

impl ApiError {
    /// Map this failure to its recovery action: auth failures log out,
    /// authorization failures go home, validation stays inline, everything
    /// transient becomes a retry toast.
    pub fn remedy(&self) -> Remedy {
        match self {
            ApiError::Unauthorized(_) => Remedy::ForceLogout,
            ApiError::Forbidden(_) => Remedy::RedirectHome,
            ApiError::Validation(msg) | ApiError::NotFound(msg) => {
                Remedy::ShowMessage(msg.clone())
            }
            ApiError::Server { .. }
            | ApiError::Connection(_)
            | ApiError::Network(_)
            | ApiError::Decode(_) => Remedy::RetryToast(self.to_string()),
        }
    }

    /// Build an `ApiError` from a non-success response.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body);
        match status {
            401 => ApiError::Unauthorized(detail),
            403 => ApiError::Forbidden(detail),
            400 | 422 => ApiError::Validation(detail),
            404 => ApiError::NotFound(detail),
            _ => ApiError::Server { status, body: detail },
        }
    }

    /// Classify a transport-level reqwest failure.
    pub(crate) fn from_transport(base_url: &str, e: reqwest::Error) -> Self {
        if e.is_connect() {
            ApiError::Connection(base_url.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// The backend wraps human-readable messages as `{"detail": "..."}`.
/// Fall back to the raw body when the shape differs.
fn extract_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct Detail {
        detail: String,
    }
    match serde_json::from_str::<Detail>(body) {
        Ok(d) => d.detail,
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failure_forces_logout() {
        let e = ApiError::Unauthorized("token expired".into());
        assert_eq!(e.remedy(), Remedy::ForceLogout);
    }

    #[test]
    fn authorization_failure_redirects_home() {
        let e = ApiError::Forbidden("doctor role required".into());
        assert_eq!(e.remedy(), Remedy::RedirectHome);
    }

    #[test]
    fn validation_failure_keeps_form() {
        let e = ApiError::Validation("Email already registered".into());
        assert_eq!(
            e.remedy(),
            Remedy::ShowMessage("Email already registered".into())
        );
    }

    #[test]
    fn not_found_is_a_message_not_a_crash() {
        let e = ApiError::NotFound("Report not found".into());
        assert!(matches!(e.remedy(), Remedy::ShowMessage(_)));
    }

    #[test]
    fn transient_failures_are_retry_toasts() {
        for e in [
            ApiError::Connection("http://localhost:8000".into()),
            ApiError::Network("connection reset".into()),
            ApiError::Server { status: 500, body: "oops".into() },
            ApiError::Decode("missing field".into()),
        ] {
            assert!(matches!(e.remedy(), Remedy::RetryToast(_)));
        }
    }

    #[test]
    fn detail_wrapper_is_unwrapped() {
        assert_eq!(extract_detail(r#"{"detail": "Invalid ID"}"#), "Invalid ID");
        assert_eq!(extract_detail("plain text"), "plain text");
    }
}
