//! Proxy validation
//!
//! Candidates are judged by fetching a fixed URL through them.

pub mod health;

pub use health::{HealthCheck, HealthChecker, HealthCheckerConfig, ProbeOutcome};
