//! Maps raw transport failures to the user-facing outcome taxonomy.

use redress_core::types::outcome::{FailureKind, LoginFailure, RawFailure};

/// Classify a raw failure into exactly one user-facing category.
///
/// Precedence: connectivity failures first (they carry no status), then
/// the 429 rate limit, then a non-empty field-error list, then message
/// extraction with a generic fallback. `AccessDenied` is never produced
/// here — it requires a successful response body and is decided by the
/// session controller.
pub fn classify(failure: &RawFailure) -> FailureKind {
    match failure {
        RawFailure::Network { .. } => FailureKind::NetworkUnreachable,
        RawFailure::Decode { .. } => FailureKind::ServerError {
            message: "Invalid response from server".to_string(),
        },
        RawFailure::Http { status, body } => {
            if *status == 429 {
                return FailureKind::RateLimited {
                    lockout_minutes: body.lockout_time,
                };
            }
            if let Some(errors) = body.errors.as_ref().filter(|e| !e.is_empty()) {
                return FailureKind::ValidationFailed {
                    field_errors: errors.iter().map(|e| e.msg.clone()).collect(),
                };
            }
            FailureKind::CredentialsRejected {
                message: body
                    .message
                    .clone()
                    .unwrap_or_else(|| "Login failed. Please check your credentials.".to_string()),
            }
        }
    }
}

/// Classify and carry the body's `code` and `remaining` fields along.
pub fn to_login_failure(failure: RawFailure) -> LoginFailure {
    let kind = classify(&failure);
    let (code, remaining) = match failure {
        RawFailure::Http { body, .. } => (body.code, body.remaining),
        _ => (None, None),
    };
    LoginFailure {
        kind,
        code,
        remaining,
    }
}
