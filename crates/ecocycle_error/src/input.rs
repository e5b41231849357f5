//! Input file error types.

/// Failure to read or parse a user-supplied input file.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Input Error: {} at line {} in {}", message, line, file)]
pub struct InputError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl InputError {
    /// Create a new InputError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use ecocycle_error::InputError;
    ///
    /// let err = InputError::new("expected an array of detections");
    /// assert!(err.message.contains("detections"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
