//! Generative text provider integrations for Ecocycle.
//!
//! Each provider lives behind its own feature flag.
//!
//! # Available Providers
//!
//! - **Gemini** (Google) - Enable with `gemini` feature
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "gemini")]
//! # {
//! use ecocycle_interface::{AdviceProvider, AdviceRequest};
//! use ecocycle_models::GeminiProvider;
//! use ecocycle_rate_limit::ProviderConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GeminiProvider::from_config(&ProviderConfig::default())?;
//! let answer = provider.generate(&AdviceRequest::new("How do I recycle a laptop?")).await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! # }
//! ```

mod status;

pub use status::{extract_status_code, parse_provider_error};

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiProvider;
