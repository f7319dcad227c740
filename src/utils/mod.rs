//! # Utility Modules
//!
//! Ambient support for the codecs.
//!
//! ## Components
//! - **Logging**: `tracing-subscriber` setup from `LoggingConfig`
//! - **Metrics**: thread-safe framing counters

pub mod logging;
pub mod metrics;

pub use metrics::{MetricsSnapshot, WireMetrics};
