//! Mapping provider failures onto the caller-facing error taxonomy.

use ecocycle_error::{AdviceErrorKind, ProviderError, ProviderErrorKind};

/// Classify a provider failure that is not a rate-limit or quota error.
///
/// Rate-limit errors are handled by the gateway itself because their
/// reply depends on the backoff state.
///
/// # Examples
///
/// ```
/// use ecocycle_advice::classify_provider_error;
/// use ecocycle_error::{AdviceErrorKind, ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::ApiRequest(
///     "API key not valid. reason: API_KEY_INVALID".to_string(),
/// ));
/// assert_eq!(classify_provider_error(&err), AdviceErrorKind::InvalidCredential);
/// ```
pub fn classify_provider_error(err: &ProviderError) -> AdviceErrorKind {
    if let ProviderErrorKind::MissingApiKey(_) = err.kind {
        return AdviceErrorKind::Configuration;
    }

    let message = err.kind.message();
    if message.contains("API_KEY_INVALID") {
        AdviceErrorKind::InvalidCredential
    } else if message.contains("API not enabled") || message.contains("SERVICE_DISABLED") {
        AdviceErrorKind::ApiNotEnabled
    } else {
        AdviceErrorKind::ServiceUnavailable
    }
}
