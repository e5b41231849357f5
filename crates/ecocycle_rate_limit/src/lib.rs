//! Admission control for calls to a generative text provider.
//!
//! The pieces here are plain, synchronous state machines driven by the
//! gateway's drain task:
//! - [`RateWindow`] keeps a sliding log of weighted dispatch timestamps
//! - [`BackoffState`] tracks consecutive provider rate-limit errors
//! - [`RateGovernor`] combines them into a single admit/deny decision
//!
//! Configuration is loaded from `ecocycle.toml` layers by [`EcocycleConfig`].

mod backoff;
mod config;
mod governor;
mod window;

pub use backoff::{BackoffState, backoff_duration};
pub use config::{AdmissionPolicy, EcocycleConfig, GatewayConfig, ProviderConfig};
pub use governor::{Admission, DenyReason, RateGovernor, estimate_tokens};
pub use window::RateWindow;
