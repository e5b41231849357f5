//! Errors raised by advice provider implementations.

/// Provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// API key not found in the environment
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// Failed to construct the provider client
    #[display("Failed to create provider client: {}", _0)]
    ClientCreation(String),
    /// API request failed without a recognisable status code
    #[display("Provider request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// The provider answered without any text
    #[display("Provider returned an empty response")]
    EmptyResponse,
}

impl ProviderErrorKind {
    /// The raw provider message, used for marker-based classification.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether the provider signalled a rate-limit or quota condition.
    ///
    /// Providers are inconsistent about status codes, so the message is
    /// searched for the `429` and `quota` markers as well.
    pub fn is_rate_limited(&self) -> bool {
        if let ProviderErrorKind::HttpError { status_code: 429, .. } = self {
            return true;
        }
        let message = self.message();
        message.contains("429") || message.to_lowercase().contains("quota")
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use ecocycle_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::HttpError {
///     status_code: 429,
///     message: "Resource has been exhausted".to_string(),
/// });
/// assert!(err.kind.is_rate_limited());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_marker_is_rate_limited() {
        let kind = ProviderErrorKind::ApiRequest("Quota exceeded for metric".to_string());
        assert!(kind.is_rate_limited());
    }

    #[test]
    fn status_in_message_is_rate_limited() {
        let kind = ProviderErrorKind::ApiRequest("bad response from server; code 429".to_string());
        assert!(kind.is_rate_limited());
    }

    #[test]
    fn server_error_is_not_rate_limited() {
        let kind = ProviderErrorKind::HttpError {
            status_code: 503,
            message: "overloaded".to_string(),
        };
        assert!(!kind.is_rate_limited());
    }
}
