//! Per-invocation overrides of the gateway and provider settings.

use clap::Args;
use ecocycle_rate_limit::{AdmissionPolicy, EcocycleConfig};

/// CLI rate limiting options.
///
/// Allows overriding values loaded from configuration files. Each flag
/// replaces only its own field; unset flags leave the file value in place.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct RateLimitOptions {
    /// Override requests per window
    #[arg(long)]
    pub rpm: Option<u32>,

    /// Override estimated tokens per window
    #[arg(long)]
    pub tpm: Option<u64>,

    /// Override the minimum gap between requests, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Behaviour when the window is full (reject, wait)
    #[arg(long)]
    pub admission: Option<AdmissionPolicy>,

    /// Override the per-request timeout, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Override the provider model
    #[arg(long)]
    pub model: Option<String>,
}

impl RateLimitOptions {
    /// Apply CLI overrides to a loaded configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Base configuration to modify
    ///
    /// # Returns
    ///
    /// Modified configuration with CLI overrides applied
    pub fn apply_to_config(&self, mut config: EcocycleConfig) -> EcocycleConfig {
        if let Some(rpm) = self.rpm {
            config.gateway.rpm = rpm;
        }
        if let Some(tpm) = self.tpm {
            config.gateway.tpm = tpm;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.gateway.inter_request_delay_ms = delay_ms;
        }
        if let Some(admission) = self.admission {
            config.gateway.admission = admission;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.gateway.request_timeout_secs = timeout_secs;
        }
        if let Some(model) = &self.model {
            config.provider.model = model.clone();
        }
        config
    }
}
