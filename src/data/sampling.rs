//! Row subsampling and train/test splitting.
//!
//! The subsample draw is uniform without replacement and leaves the drawn
//! rows in random order; the split that follows is purely positional. All
//! randomness comes from caller-provided RNGs or the seed in
//! [`SplitConfig`], never from ambient global state.

use log::info;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::bundle::DatasetBundle;
use super::error::{SampleSizeError, SplitConfigError};

/// Train/test split configuration.
///
/// `shuffle` re-permutes the sampled rows (seeded) before the positional
/// split. The CTR pipeline keeps it off: the subsample draw already
/// randomizes row order, and the historical stratified/shuffled split was
/// abandoned. The switch stays here so the alternative is a configuration,
/// not a code edit.
#[derive(Debug, Clone, Copy)]
pub struct SplitConfig {
	pub test_fraction: f64,
	pub shuffle: bool,
	pub seed: u64,
}

impl Default for SplitConfig {
	fn default() -> Self {
		Self {
			test_fraction: 0.01,
			shuffle: false,
			seed: 42,
		}
	}
}

/// Draw `num_rows` distinct row indices uniformly from `0..available`.
///
/// Indices come back in random order; the positional split downstream
/// relies on that order being random rather than sorted.
pub fn sample_indices<R: Rng + ?Sized>(
	available: usize,
	num_rows: usize,
	rng: &mut R,
) -> Result<Vec<usize>, SampleSizeError> {
	if num_rows == 0 {
		return Err(SampleSizeError::Empty);
	}
	if num_rows > available {
		return Err(SampleSizeError::TooLarge {
			requested: num_rows,
			available,
		});
	}
	Ok(rand::seq::index::sample(rng, available, num_rows).into_vec())
}

/// Subsample `num_rows` rows of (X, y) without replacement.
pub fn subsample<R: Rng + ?Sized>(
	x: ArrayView2<'_, f32>,
	y: ArrayView1<'_, f32>,
	num_rows: usize,
	rng: &mut R,
) -> Result<(Array2<f32>, Array1<f32>), SampleSizeError> {
	let indices = sample_indices(y.len(), num_rows, rng)?;
	Ok((x.select(Axis(0), &indices), y.select(Axis(0), &indices)))
}

/// Partition sizes for a positional split: test rows round up.
///
/// test = ceil(rows * fraction), clamped so both partitions stay non-empty.
/// The fraction must arrive as f64: widening an inexact f32 overshoots
/// exact products (1000 rows at 0.001 is exactly 1 test row).
pub(crate) fn split_lengths(rows: usize, test_fraction: f64) -> Result<(usize, usize), SplitConfigError> {
	if !(test_fraction > 0.0 && test_fraction < 1.0) {
		return Err(SplitConfigError::FractionOutOfRange(test_fraction));
	}
	if rows < 2 {
		return Err(SplitConfigError::EmptyPartition { rows });
	}
	let test = ((rows as f64) * test_fraction).ceil() as usize;
	let test = test.clamp(1, rows - 1);
	Ok((rows - test, test))
}

/// Split sampled (X, y) into a [`DatasetBundle`].
///
/// Positional: the first `1 - test_fraction` share of rows becomes the
/// train partition, the remainder the test partition, in the order the
/// sampler produced. Deterministic given `config` and the input order.
pub fn split(x: Array2<f32>, y: Array1<f32>, config: &SplitConfig) -> Result<DatasetBundle, SplitConfigError> {
	let (train_len, test_len) = split_lengths(y.len(), config.test_fraction)?;

	let (x, y) = if config.shuffle {
		let mut order: Vec<usize> = (0..y.len()).collect();
		order.shuffle(&mut StdRng::seed_from_u64(config.seed));
		(x.select(Axis(0), &order), y.select(Axis(0), &order))
	} else {
		(x, y)
	};

	let (x_train, x_test) = x.view().split_at(Axis(0), train_len);
	let (y_train, y_test) = y.view().split_at(Axis(0), train_len);
	info!("split {} sampled rows into {} train / {} test", y.len(), train_len, test_len);

	Ok(DatasetBundle::new(
		x_train.to_owned(),
		x_test.to_owned(),
		y_train.to_owned(),
		y_test.to_owned(),
	))
}
