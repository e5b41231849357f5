//! Google Gemini provider.
//!
//! A single REST client bound to one model. Requests are one user turn of
//! plain text with explicit sampling parameters; no streaming, no retries.

mod client;

pub use client::GeminiProvider;
