//! Errors surfaced by the advice gateway to its callers.

use std::time::Duration;

/// Conditions under which a request for advice fails.
///
/// The display strings are written for end users; the presentation layer may
/// show them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AdviceErrorKind {
    /// The provider credential is not configured
    #[display("Advice provider API key is not configured")]
    Configuration,
    /// The local request or token budget is exhausted
    #[display(
        "Rate limit exceeded. Please wait {} seconds before trying again.",
        wait_secs
    )]
    RateLimited {
        /// Seconds until the budget frees up
        wait_secs: u64,
    },
    /// The provider reported a rate-limit or quota error
    #[display(
        "The service is currently busy. Please try again in {} seconds.",
        wait_secs
    )]
    ProviderBusy {
        /// Seconds until the backoff window closes
        wait_secs: u64,
    },
    /// The provider rejected the credential
    #[display("Invalid API key. Please check your provider configuration.")]
    InvalidCredential,
    /// The generative language API is disabled for the credential's project
    #[display("The Generative Language API is not enabled for this project. Enable it and ensure billing is set up.")]
    ApiNotEnabled,
    /// The provider did not answer before the request deadline
    #[display("The AI service did not respond within {} seconds.", after_secs)]
    Timeout {
        /// Deadline that elapsed
        after_secs: u64,
    },
    /// The request was malformed before it reached the queue
    #[display("Invalid advice request: {}", _0)]
    InvalidRequest(String),
    /// The gateway's drain task is no longer running
    #[display("The advice gateway has shut down.")]
    GatewayClosed,
    /// Any other failure (network, malformed response, unknown provider error)
    #[display("Unable to connect to AI service. Please try again later.")]
    ServiceUnavailable,
}

impl AdviceErrorKind {
    /// Short label used for metrics and structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            AdviceErrorKind::Configuration => "configuration",
            AdviceErrorKind::RateLimited { .. } => "rate_limited",
            AdviceErrorKind::ProviderBusy { .. } => "provider_busy",
            AdviceErrorKind::InvalidCredential => "invalid_credential",
            AdviceErrorKind::ApiNotEnabled => "api_not_enabled",
            AdviceErrorKind::Timeout { .. } => "timeout",
            AdviceErrorKind::InvalidRequest(_) => "invalid_request",
            AdviceErrorKind::GatewayClosed => "gateway_closed",
            AdviceErrorKind::ServiceUnavailable => "service_unavailable",
        }
    }

    /// How long the caller should wait before asking again, if known.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            AdviceErrorKind::RateLimited { wait_secs }
            | AdviceErrorKind::ProviderBusy { wait_secs } => {
                Some(Duration::from_secs(*wait_secs))
            }
            _ => None,
        }
    }
}

/// Advice error with source location tracking.
///
/// # Examples
///
/// ```
/// use ecocycle_error::{AdviceError, AdviceErrorKind};
///
/// let err = AdviceError::new(AdviceErrorKind::RateLimited { wait_secs: 42 });
/// assert!(err.to_string().contains("42 seconds"));
/// assert_eq!(err.kind().label(), "rate_limited");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Advice Error: {} at line {} in {}", kind, line, file)]
pub struct AdviceError {
    kind: AdviceErrorKind,
    line: u32,
    file: &'static str,
}

impl AdviceError {
    /// Create a new AdviceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AdviceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AdviceErrorKind {
        &self.kind
    }

    /// The user-facing message, without location details.
    pub fn user_message(&self) -> String {
        self.kind.to_string()
    }
}

/// Result type for advice operations.
pub type AdviceResult<T> = Result<T, AdviceError>;
