//! Error types for the Ecocycle workspace.
//!
//! Every domain follows the same `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with the source location that raised it
//! - constructors use `#[track_caller]` so the location is captured automatically
//!
//! # Examples
//!
//! ```
//! use ecocycle_error::{AdviceError, AdviceErrorKind, EcocycleResult};
//!
//! fn ask() -> EcocycleResult<String> {
//!     Err(AdviceError::new(AdviceErrorKind::ServiceUnavailable))?
//! }
//!
//! assert!(ask().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod advice;
mod config;
mod error;
mod history;
mod input;
mod provider;

pub use advice::{AdviceError, AdviceErrorKind, AdviceResult};
pub use config::ConfigError;
pub use error::{EcocycleError, EcocycleErrorKind, EcocycleResult};
pub use history::{HistoryError, HistoryErrorKind, HistoryResult};
pub use input::InputError;
pub use provider::{ProviderError, ProviderErrorKind, ProviderResult};
