//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - HTTP connectivity probe for the API endpoints
//! - Tokio runtime bridge for async operations

pub mod probe;
pub mod runtime;

pub use probe::{HttpProbe, Probe, ProbeError, ProbeReport};
