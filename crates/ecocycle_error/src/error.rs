//! Top-level error wrapper types.

use crate::{AdviceError, ConfigError, HistoryError, InputError, ProviderError};

/// The foundation error enum aggregating every domain error.
///
/// # Examples
///
/// ```
/// use ecocycle_error::{EcocycleError, ConfigError};
///
/// let err: EcocycleError = ConfigError::new("missing [gateway] table").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum EcocycleErrorKind {
    /// Advice gateway error
    #[from(AdviceError)]
    Advice(AdviceError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Advice provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Detection history error
    #[from(HistoryError)]
    History(HistoryError),
    /// Input file error
    #[from(InputError)]
    Input(InputError),
}

/// Ecocycle error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Ecocycle Error: {}", _0)]
pub struct EcocycleError(Box<EcocycleErrorKind>);

impl EcocycleError {
    /// Create a new error from a kind.
    pub fn new(kind: EcocycleErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &EcocycleErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to EcocycleErrorKind
impl<T> From<T> for EcocycleError
where
    T: Into<EcocycleErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Ecocycle operations.
pub type EcocycleResult<T> = std::result::Result<T, EcocycleError>;
