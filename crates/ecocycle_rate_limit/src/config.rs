//! Configuration structures for the advice gateway.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from ecocycle.toml)
//! - User overrides (./ecocycle.toml or ~/.config/ecocycle/ecocycle.toml)
//! - Automatic merging with user values taking precedence

use config::{Config, File, FileFormat};
use ecocycle_core::GenerationParams;
use ecocycle_error::{ConfigError, EcocycleError, EcocycleResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// What the drain task does when the request or token window is full.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdmissionPolicy {
    /// Answer the head request with a rate-limit error carrying the wait time
    #[default]
    Reject,
    /// Sleep until the window frees up, then dispatch
    Wait,
}

/// Pacing limits for the advice gateway.
///
/// # Example
///
/// ```toml
/// [gateway]
/// rpm = 5
/// tpm = 5_000
/// inter_request_delay_ms = 2_000
/// admission = "reject"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Requests admitted per window
    pub rpm: u32,

    /// Estimated tokens admitted per window
    pub tpm: u64,

    /// Sliding window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Minimum gap between consecutive dispatches
    pub inter_request_delay_ms: u64,

    /// Backoff base, doubled per consecutive provider rate-limit error
    pub base_backoff_ms: u64,

    /// Backoff ceiling
    pub max_backoff_ms: u64,

    /// Saturation cap for the consecutive error counter
    pub max_consecutive_errors: u32,

    /// Deadline for a single provider call
    pub request_timeout_secs: u64,

    /// Behaviour when the window is full
    #[serde(default)]
    pub admission: AdmissionPolicy,
}

fn default_window_secs() -> u64 {
    60
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            rpm: 5,
            tpm: 5_000,
            window_secs: default_window_secs(),
            inter_request_delay_ms: 2_000,
            base_backoff_ms: 1_000,
            max_backoff_ms: 120_000,
            max_consecutive_errors: 6,
            request_timeout_secs: 30,
            admission: AdmissionPolicy::Reject,
        }
    }
}

impl GatewayConfig {
    /// Sliding window length.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Minimum gap between dispatches.
    pub fn inter_request_delay(&self) -> Duration {
        Duration::from_millis(self.inter_request_delay_ms)
    }

    /// Backoff base.
    pub fn base_backoff(&self) -> Duration {
        Duration::from_millis(self.base_backoff_ms)
    }

    /// Backoff ceiling.
    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }

    /// Per-call provider deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reject limits that would stall the gateway forever.
    pub fn validate(&self) -> EcocycleResult<()> {
        if self.rpm == 0 {
            return Err(ConfigError::new("gateway.rpm must be greater than zero").into());
        }
        if self.tpm == 0 {
            return Err(ConfigError::new("gateway.tpm must be greater than zero").into());
        }
        if self.window_secs == 0 {
            return Err(ConfigError::new("gateway.window_secs must be greater than zero").into());
        }
        if self.request_timeout_secs == 0 {
            return Err(
                ConfigError::new("gateway.request_timeout_secs must be greater than zero").into(),
            );
        }
        if self.base_backoff_ms > self.max_backoff_ms {
            return Err(ConfigError::new(format!(
                "gateway.base_backoff_ms ({}) exceeds gateway.max_backoff_ms ({})",
                self.base_backoff_ms, self.max_backoff_ms
            ))
            .into());
        }
        Ok(())
    }
}

/// Generative text provider settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Model identifier
    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Top-k sampling cutoff
    pub top_k: u32,

    /// Nucleus sampling cutoff
    pub top_p: f32,

    /// Maximum tokens in the answer
    pub max_output_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let generation = GenerationParams::default();
        Self {
            model: "gemini-1.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            temperature: *generation.temperature(),
            top_k: *generation.top_k(),
            top_p: *generation.top_p(),
            max_output_tokens: *generation.max_output_tokens(),
        }
    }
}

impl ProviderConfig {
    /// Sampling parameters sent with each request.
    pub fn generation(&self) -> GenerationParams {
        GenerationParams::new(
            self.temperature,
            self.top_k,
            self.top_p,
            self.max_output_tokens,
        )
    }
}

/// Top-level Ecocycle configuration.
///
/// Loads configuration from TOML files with a precedence system:
/// 1. Bundled defaults (include_str! from ecocycle.toml)
/// 2. User override (./ecocycle.toml or ~/.config/ecocycle/ecocycle.toml)
///
/// # Example
///
/// ```no_run
/// use ecocycle_rate_limit::EcocycleConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = EcocycleConfig::load()?;
/// println!("Requests per minute: {}", config.gateway.rpm);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct EcocycleConfig {
    /// Gateway pacing limits
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl EcocycleConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> EcocycleResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                EcocycleError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                EcocycleError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.gateway.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (ecocycle.toml shipped with the library)
    /// 2. User config in home directory (~/.config/ecocycle/ecocycle.toml)
    /// 3. User config in current directory (./ecocycle.toml)
    ///
    /// User config files are optional and will be silently skipped if not found.
    #[instrument]
    pub fn load() -> EcocycleResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/ecocycle/ecocycle.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("ecocycle").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| {
                EcocycleError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                EcocycleError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.gateway.validate()?;
        Ok(config)
    }
}

// Bundled default configuration
const DEFAULT_CONFIG: &str = include_str!("../../../ecocycle.toml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_match_struct_defaults() {
        let config: EcocycleConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config, EcocycleConfig::default());
    }

    #[test]
    fn zero_rpm_is_rejected() {
        let gateway = GatewayConfig {
            rpm: 0,
            ..GatewayConfig::default()
        };
        assert!(gateway.validate().is_err());
    }

    #[test]
    fn provider_generation_params() {
        let provider = ProviderConfig::default();
        assert_eq!(provider.generation(), GenerationParams::default());
    }
}
