//! Turning provider SDK error strings into structured errors.

use ecocycle_error::{ProviderError, ProviderErrorKind};

/// Parse an SDK error into a [`ProviderError`], keeping the HTTP status when present.
///
/// # Examples
///
/// ```
/// use ecocycle_error::ProviderErrorKind;
/// use ecocycle_models::parse_provider_error;
///
/// let err = parse_provider_error("bad response from server; code 429; description: quota");
/// assert!(matches!(err.kind, ProviderErrorKind::HttpError { status_code: 429, .. }));
/// ```
#[track_caller]
pub fn parse_provider_error(err: impl std::fmt::Display) -> ProviderError {
    let err_msg = err.to_string();

    if let Some(status_code) = extract_status_code(&err_msg) {
        ProviderError::new(ProviderErrorKind::HttpError {
            status_code,
            message: err_msg,
        })
    } else {
        ProviderError::new(ProviderErrorKind::ApiRequest(err_msg))
    }
}

/// Extract an HTTP status code from strings like
/// `"bad response from server; code 503; description: ..."`.
pub fn extract_status_code(error_msg: &str) -> Option<u16> {
    let code_start = error_msg.find("code ")?;
    let code_str = &error_msg[code_start + 5..];
    let end = code_str
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(code_str.len());
    code_str[..end].parse().ok()
}
