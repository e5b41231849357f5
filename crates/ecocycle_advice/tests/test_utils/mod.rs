//! Test utilities for advice gateway tests.
//!
//! This module provides a scriptable mock provider.

pub mod mock_provider;

#[allow(unused_imports)]
pub use mock_provider::{MockBehavior, MockProvider, MockResponse};
