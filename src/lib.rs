//! ctr-bench: a gradient boosting benchmark harness for the Criteo CTR dataset.
//!
//! Loads the pre-converted shard tree, draws a uniform subsample, splits it
//! positionally and times each registered library configuration on the same
//! [`DatasetBundle`].
//!
//! # Key Types
//!
//! - [`DatasetBundle`] - Train/test partitions handed to every trainer
//! - [`PrepareConfig`] / [`prepare`] - Shard loading, sampling and splitting
//! - [`BenchmarkSpec`] / [`benchmarks`] - The registered configurations
//! - [`Trainer`] - Library adapter trait (feature-gated backends)
//! - [`MetricsReport`] - Quality metrics computed on the test partition
//!
//! # Backends
//!
//! Library adapters compile behind cargo features: `bench-xgboost`,
//! `bench-lightgbm` and `bench-gbdt`. The registry itself is always
//! available; entries whose backend is compiled out are reported as skipped.

pub mod data;
pub mod metrics;
pub mod registry;
pub mod testing;
pub mod trainers;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Pipeline types (most users want these)
pub use data::{prepare, prepare_with, DatasetBundle, PrepareConfig, PrepareError};

// Registry and trainer dispatch
pub use registry::{benchmarks, BenchmarkSpec, Device, TrainerParams};
pub use trainers::{backend_feature, build_trainer, TrainError, Trainer};

// Quality metrics
pub use metrics::{binary_class_metrics, binary_prob_metrics, MetricsFn, MetricsReport};
