//! Trait definitions for Ecocycle advice providers.
//!
//! The advice gateway talks to a generative text service only through
//! [`AdviceProvider`], so tests and alternative backends can be swapped in.

mod traits;
mod types;

pub use traits::AdviceProvider;
pub use types::{AdviceRequest, AdviceRequestBuilder};
