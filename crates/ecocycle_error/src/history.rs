//! Detection history error types.

/// Detection history error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HistoryErrorKind {
    /// Records can only be written for an identified user
    #[display("User must be authenticated")]
    MissingUser,
    /// Nothing worth storing was supplied
    #[display("No waste items to record")]
    NothingToRecord,
    /// Backend storage failure
    #[display("History backend error: {}", _0)]
    Backend(String),
}

/// Detection history error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("History Error: {} at line {} in {}", kind, line, file)]
pub struct HistoryError {
    kind: HistoryErrorKind,
    line: u32,
    file: &'static str,
}

impl HistoryError {
    /// Create a new history error with caller location tracking.
    #[track_caller]
    pub fn new(kind: HistoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HistoryErrorKind {
        &self.kind
    }
}

/// Result type for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;
