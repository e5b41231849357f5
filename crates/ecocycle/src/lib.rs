//! Ecocycle - recycling advice from object detections
//!
//! Ecocycle turns object detector output into waste categories, session
//! insights and recycling advice. Advice comes from a generative text provider
//! reached through a single rate-governed gateway, so every caller shares one
//! request budget, one token budget and one backoff state.
//!
//! # Features
//!
//! - **Classification**: map detector labels to recyclable, electronic,
//!   hazardous, organic or other
//! - **Insights**: per-category statistics, recommendations and tips
//! - **Advice Gateway**: FIFO queue with sliding-window request and token
//!   budgets and exponential backoff after provider rate-limit errors
//! - **Providers**: Gemini behind the `gemini` feature
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ecocycle::{AdviceGateway, EcocycleConfig, GeminiProvider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EcocycleConfig::load()?;
//!     let provider = Arc::new(GeminiProvider::from_config(&config.provider)?);
//!     let gateway = AdviceGateway::spawn(provider, &config)?;
//!
//!     let labels = vec!["laptop".to_string(), "bottle".to_string()];
//!     let advice = gateway.request_advice("How do I dispose of these?", &labels).await?;
//!     println!("{advice}");
//!     Ok(())
//! }
//! ```
//!
//! # Feature Flags
//!
//! - `gemini` (default): Google Gemini provider

#![forbid(unsafe_code)]

pub mod cli;
mod logging;

pub use logging::{LoggingConfig, init_logging};

// Re-export everything from the workspace crates for convenience
pub use ecocycle_advice::*;
pub use ecocycle_core::*;
pub use ecocycle_error::*;
pub use ecocycle_interface::*;
pub use ecocycle_rate_limit::*;

#[cfg(feature = "gemini")]
pub use ecocycle_models::*;
