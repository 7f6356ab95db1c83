#![forbid(unsafe_code)]

//! Core: display scaling metrics — computation, memoization, and per-unit
//! override resolution.
//!
//! Layouts authored against a fixed design size (for example 360 dp wide)
//! render at consistent physical proportions on heterogeneous screens by
//! recomputing the display density from the real screen extent at every
//! unit activation. [`engine::AdaptEngine`] owns that computation, a
//! compute-once [`cache::MetricsCache`], and a
//! [`registry::OverrideRegistry`] of per-type exclusions and third-party
//! parameters.

pub mod cache;
pub mod config;
pub mod engine;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod units;

pub use cache::{CacheKey, MetricsCache};
pub use config::{ConfigError, ScaleConfig, ScaleConfigBuilder};
pub use engine::{AdaptEngine, CustomAdapt, MetricsSink};
pub use metrics::{DisplayMetrics, MetricsSnapshot};
pub use registry::{CustomAdaptInfo, OverrideRegistry, UnitTypeId};
pub use units::{Subunit, Unit, UnitFlags, UnitSupport, apply_dimension};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
