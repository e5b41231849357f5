//! Request types passed to advice providers.

use derive_getters::Getters;
use ecocycle_core::GenerationParams;
use serde::{Deserialize, Serialize};

/// A fully composed prompt plus its sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct AdviceRequest {
    /// Prompt text sent as a single user turn
    prompt: String,
    /// Sampling parameters
    #[builder(default)]
    #[serde(default)]
    generation: GenerationParams,
}

impl AdviceRequest {
    /// Create a request with default generation parameters.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            generation: GenerationParams::default(),
        }
    }

    /// Replace the generation parameters.
    pub fn with_generation(mut self, generation: GenerationParams) -> Self {
        self.generation = generation;
        self
    }
}
