//! Rate-governed access to a generative text provider.
//!
//! [`AdviceGateway`] is a cheap, cloneable handle to a single drain task
//! that owns the rate windows, the backoff state and the FIFO queue. Every
//! call is answered through its own [`AdviceTicket`], so callers never
//! share a result and a dropped ticket is skipped before dispatch.
//!
//! # Example
//!
//! ```no_run
//! use ecocycle_advice::AdviceGateway;
//! use ecocycle_interface::AdviceProvider;
//! use ecocycle_rate_limit::EcocycleConfig;
//! use std::sync::Arc;
//!
//! # async fn example(provider: Arc<dyn AdviceProvider>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = EcocycleConfig::load()?;
//! let gateway = AdviceGateway::spawn(provider, &config)?;
//! let answer = gateway
//!     .request_advice("How should I dispose of these?", &["laptop".to_string()])
//!     .await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

mod assistant;
mod classify;
mod gateway;
mod metrics;
mod prompt;

pub use assistant::{
    DISPOSAL_GUIDE_FALLBACK, HABITS_FALLBACK, analyze_waste_habits, disposal_guide,
};
pub use classify::classify_provider_error;
pub use gateway::{AdviceGateway, AdviceTicket};
pub use metrics::AdviceMetrics;
pub use prompt::{compose_advice_prompt, disposal_guide_prompt, waste_habits_prompt};
