//! Dataset preparation pipeline for the Criteo CTR benchmark.
//!
//! Flow: glob pattern -> shard loading -> label/feature split -> uniform
//! subsample -> positional train/test split -> [`DatasetBundle`]. Everything
//! before the bundle is transient and dropped as soon as its successor
//! exists; shards are large relative to memory.

pub mod bundle;
pub mod error;
pub mod sampling;
pub mod shards;

pub use bundle::DatasetBundle;
pub use error::{DataLoadError, PrepareError, SampleSizeError, SplitConfigError};
pub use sampling::{sample_indices, split, subsample, SplitConfig};
pub use shards::load_shards;

use std::path::PathBuf;
use std::time::Instant;

use log::info;
use ndarray::{s, Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default subsample size, matching the historical harness.
pub const DEFAULT_NUM_ROWS: usize = 20_000_000;

/// Default share of sampled rows held out for testing.
pub const DEFAULT_TEST_FRACTION: f64 = 0.01;

/// Default seed for shard ordering, sampling and splitting.
pub const DEFAULT_SEED: u64 = 42;

/// Subdirectory under the dataset root holding the pre-converted shards.
const DATASET_SUBDIR: &str = "etled";

/// Shard glob relative to the subdirectory: the first two days of the
/// Criteo terabyte log.
const SHARD_GLOB: &str = "day_[0-1]/*.npy";

/// Full configuration for [`prepare_with`].
#[derive(Debug, Clone)]
pub struct PrepareConfig {
	/// Directory containing the `etled/` shard tree.
	pub dataset_root: PathBuf,
	/// Rows to subsample from the loaded table.
	pub num_rows: usize,
	/// Share of sampled rows going to the test partition.
	pub test_fraction: f64,
	/// Seed driving shard ordering and the subsample draw.
	pub seed: u64,
}

impl PrepareConfig {
	/// Configuration with harness defaults for the given dataset root.
	pub fn new(dataset_root: impl Into<PathBuf>) -> Self {
		Self {
			dataset_root: dataset_root.into(),
			num_rows: DEFAULT_NUM_ROWS,
			test_fraction: DEFAULT_TEST_FRACTION,
			seed: DEFAULT_SEED,
		}
	}

	/// Glob pattern for this configuration's shard files.
	pub fn shard_pattern(&self) -> String {
		self.dataset_root.join(DATASET_SUBDIR).join(SHARD_GLOB).display().to_string()
	}
}

/// Prepare the CTR dataset with default configuration.
///
/// `num_rows` falls back to [`DEFAULT_NUM_ROWS`] when `None`.
pub fn prepare(dataset_root: impl Into<PathBuf>, num_rows: Option<usize>) -> Result<DatasetBundle, PrepareError> {
	let mut config = PrepareConfig::new(dataset_root);
	if let Some(rows) = num_rows {
		config.num_rows = rows;
	}
	prepare_with(&config)
}

/// Run the full preparation pipeline.
pub fn prepare_with(config: &PrepareConfig) -> Result<DatasetBundle, PrepareError> {
	let start = Instant::now();
	let pattern = config.shard_pattern();
	let mut rng = StdRng::seed_from_u64(config.seed);

	let phase = Instant::now();
	let table = shards::load_shards(&pattern, &mut rng)?;
	info!("loaded shards in {:.2}s", phase.elapsed().as_secs_f64());

	let phase = Instant::now();
	let (x, y) = {
		let features = table.slice(s![.., 1..]);
		let labels = table.column(0);
		info!("dataset has {} rows and {} features", labels.len(), features.ncols());
		subsample(features, labels, config.num_rows, &mut rng)?
	};
	drop(table);
	info!("sampled {} rows in {:.2}s", y.len(), phase.elapsed().as_secs_f64());

	// The historical shuffled/stratified split stays disabled: the sample
	// order is already random.
	let split_config = SplitConfig {
		test_fraction: config.test_fraction,
		shuffle: false,
		seed: config.seed,
	};
	let bundle = split(x, y, &split_config)?;

	info!("CTR dataset prepared in {:.2}s", start.elapsed().as_secs_f64());
	Ok(bundle)
}

/// Split column 0 (label) from the remaining columns (features).
///
/// Kept for consumers that load a raw table themselves; [`prepare_with`]
/// slices views instead of materializing both halves.
pub fn split_label_column(table: &Array2<f32>) -> (Array2<f32>, Array1<f32>) {
	let y = table.column(0).to_owned();
	let x = table.slice(s![.., 1..]).to_owned();
	(x, y)
}
