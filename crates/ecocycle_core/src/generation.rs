//! Generation parameters sent with every advice request.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Sampling parameters for the generative text provider.
///
/// # Examples
///
/// ```
/// use ecocycle_core::GenerationParamsBuilder;
///
/// let params = GenerationParamsBuilder::default()
///     .temperature(0.2)
///     .build()
///     .unwrap();
/// assert_eq!(*params.temperature(), 0.2);
/// assert_eq!(*params.top_k(), 40);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(default)]
pub struct GenerationParams {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    temperature: f32,
    /// Top-k sampling cutoff
    #[serde(default = "default_top_k")]
    top_k: u32,
    /// Nucleus sampling cutoff
    #[serde(default = "default_top_p")]
    top_p: f32,
    /// Maximum tokens in the answer
    #[serde(default = "default_max_output_tokens")]
    max_output_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_k() -> u32 {
    40
}

fn default_top_p() -> f32 {
    0.8
}

fn default_max_output_tokens() -> u32 {
    1000
}

impl GenerationParams {
    /// Create parameters from explicit values.
    pub fn new(temperature: f32, top_k: u32, top_p: f32, max_output_tokens: u32) -> Self {
        Self {
            temperature,
            top_k,
            top_p,
            max_output_tokens,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}
