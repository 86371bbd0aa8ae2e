//! Raw transport failures and the user-facing login outcome taxonomy.

use std::fmt;

use serde::Serialize;

use super::user::UserProfile;
use super::wire::ErrorBody;
use crate::error::{AppError, ErrorKind};

/// A failure as observed at the transport boundary, before classification.
#[derive(Debug, Clone)]
pub enum RawFailure {
    /// The backend could not be reached at all (refused, DNS, timeout).
    Network {
        /// Transport-level detail, for logs only.
        detail: String,
    },
    /// The backend answered with a non-success status.
    Http {
        /// HTTP status code.
        status: u16,
        /// Leniently parsed response body.
        body: ErrorBody,
    },
    /// The backend answered 2xx but the body did not decode.
    Decode {
        /// Decode error detail, for logs only.
        detail: String,
    },
}

impl fmt::Display for RawFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network { detail } => write!(f, "network error: {detail}"),
            Self::Http { status, body } => match &body.message {
                Some(msg) => write!(f, "HTTP {status}: {msg}"),
                None => write!(f, "HTTP {status}"),
            },
            Self::Decode { detail } => write!(f, "invalid response body: {detail}"),
        }
    }
}

impl From<RawFailure> for AppError {
    fn from(failure: RawFailure) -> Self {
        let message = failure.to_string();
        let kind = match &failure {
            RawFailure::Network { .. } => ErrorKind::Network,
            RawFailure::Http { status, .. } => match status {
                401 => ErrorKind::Authentication,
                403 => ErrorKind::Authorization,
                404 => ErrorKind::NotFound,
                429 => ErrorKind::RateLimit,
                _ => ErrorKind::ExternalService,
            },
            RawFailure::Decode { .. } => ErrorKind::ExternalService,
        };
        AppError::new(kind, message)
    }
}

/// User-facing category of a failed login, with its message payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum FailureKind {
    /// The backend could not be reached.
    NetworkUnreachable,
    /// Too many failed attempts; the account is temporarily locked.
    RateLimited {
        /// Lockout duration in minutes, when the backend reports one.
        lockout_minutes: Option<u64>,
    },
    /// The request body failed field validation.
    ValidationFailed {
        /// Per-field messages, in backend order.
        field_errors: Vec<String>,
    },
    /// The account is real but not an administrator.
    AccessDenied,
    /// The backend rejected the credentials (or failed generically).
    CredentialsRejected {
        /// Server-supplied message, or the generic fallback.
        message: String,
    },
    /// The backend answered in a shape the console cannot use.
    ServerError {
        /// What went wrong, phrased for the operator.
        message: String,
    },
}

impl FailureKind {
    /// Render the user-facing message for this failure.
    pub fn message(&self) -> String {
        match self {
            Self::NetworkUnreachable => {
                "Cannot connect to server. Please check your internet connection and try again."
                    .to_string()
            }
            Self::RateLimited { lockout_minutes } => {
                let duration = match lockout_minutes {
                    Some(minutes) => minutes.to_string(),
                    None => "some time".to_string(),
                };
                format!("Too many failed attempts. Please try again in {duration} minutes.")
            }
            Self::ValidationFailed { field_errors } => field_errors.join(", "),
            Self::AccessDenied => "Access denied. Administrator privileges required.".to_string(),
            Self::CredentialsRejected { message } => message.clone(),
            Self::ServerError { message } => message.clone(),
        }
    }
}

/// Successful outcome of [`login`](crate::traits::gateway::AuthGateway).
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    /// Server-supplied greeting, or `"Login successful"`.
    pub message: String,
    /// The committed profile, capability blobs merged in.
    pub profile: UserProfile,
}

/// Failed outcome of a login attempt.
///
/// Deliberately a plain value rather than an error type: the calling UI
/// needs no exception path for the common case of bad credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginFailure {
    /// What category of failure this is.
    pub kind: FailureKind,
    /// Machine-readable code from the error body, if any.
    pub code: Option<String>,
    /// Login attempts remaining before lockout, if reported.
    pub remaining: Option<u32>,
}

impl LoginFailure {
    /// Wrap a bare kind with no code or attempt counter.
    pub fn from_kind(kind: FailureKind) -> Self {
        Self {
            kind,
            code: None,
            remaining: None,
        }
    }

    /// The user-facing message for this failure.
    pub fn message(&self) -> String {
        self.kind.message()
    }
}

impl fmt::Display for LoginFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
