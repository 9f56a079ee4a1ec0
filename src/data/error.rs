//! Error types for the dataset preparation pipeline.
//!
//! Every failure here is fatal to the run: the pipeline is a one-shot batch
//! load with no retry policy, so errors propagate straight to the caller.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while discovering and loading shard files.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
	#[error("invalid glob pattern: {0}")]
	Pattern(#[from] glob::PatternError),

	#[error("unreadable path while expanding glob: {0}")]
	Glob(#[from] glob::GlobError),

	#[error("no shard files match pattern `{pattern}`")]
	NoMatches { pattern: String },

	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	#[error("failed to parse shard {path}: {source}")]
	Npy {
		path: PathBuf,
		#[source]
		source: ndarray_npy::ReadNpyError,
	},

	#[error("shard {path} has {got} columns, expected {expected} (from first shard)")]
	ColumnCountMismatch {
		path: PathBuf,
		expected: usize,
		got: usize,
	},

	#[error("failed to concatenate shards: {0}")]
	Concat(#[from] ndarray::ShapeError),
}

/// Requested subsample size cannot be drawn from the loaded table.
#[derive(Debug, thiserror::Error)]
pub enum SampleSizeError {
	#[error("requested {requested} rows but only {available} are available")]
	TooLarge { requested: usize, available: usize },

	#[error("requested a zero-row sample")]
	Empty,
}

/// Invalid train/test split configuration.
#[derive(Debug, thiserror::Error)]
pub enum SplitConfigError {
	#[error("test fraction {0} is outside (0, 1)")]
	FractionOutOfRange(f64),

	#[error("cannot split {rows} sampled rows into non-empty train and test partitions")]
	EmptyPartition { rows: usize },
}

/// Umbrella error for [`prepare`](crate::data::prepare).
#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
	#[error(transparent)]
	Load(#[from] DataLoadError),

	#[error(transparent)]
	Sample(#[from] SampleSizeError),

	#[error(transparent)]
	Split(#[from] SplitConfigError),
}
