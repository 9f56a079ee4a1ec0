//! Synthetic CTR fixtures for tests and local smoke runs.
//!
//! Everything here is deterministic given a seed. The shard writers panic
//! on I/O failure; they are fixture plumbing, not pipeline code.

use std::fs::File;
use std::path::Path;

use ndarray::Array2;
use ndarray_npy::WriteNpyExt;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::data::{split, split_label_column, DatasetBundle, SplitConfig};

/// Absolute tolerance for float comparisons in tests.
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// Generate a CTR-style table: column 0 holds a binary label, the remaining
/// columns uniform features in [-1, 1].
///
/// Labels are a linear score of the features thresholded at zero, so the
/// signal is learnable and roughly class-balanced.
pub fn synthetic_ctr_table(rows: usize, cols: usize, seed: u64) -> Array2<f32> {
	assert!(cols >= 2, "need a label column plus at least one feature");
	let n_features = cols - 1;
	let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

	let weights: Vec<f32> = (0..n_features).map(|_| rng.gen::<f32>() * 2.0 - 1.0).collect();

	let mut table = Array2::<f32>::zeros((rows, cols));
	for mut row in table.rows_mut() {
		let mut score = 0.0f32;
		for (c, &w) in weights.iter().enumerate() {
			let v = rng.gen::<f32>() * 2.0 - 1.0;
			row[c + 1] = v;
			score += v * w;
		}
		row[0] = if score > 0.0 { 1.0 } else { 0.0 };
	}
	table
}

/// Write `rows_per_shard` shards under `<root>/etled/day_<day>/part_<i>.npy`.
pub fn write_ctr_shards(root: &Path, day: usize, rows_per_shard: &[usize], cols: usize, seed: u64) {
	let dir = root.join("etled").join(format!("day_{day}"));
	std::fs::create_dir_all(&dir).expect("create shard directory");

	for (i, &rows) in rows_per_shard.iter().enumerate() {
		let shard_seed = seed + (day * 1000 + i) as u64 * 1337;
		let table = synthetic_ctr_table(rows, cols, shard_seed);
		let file = File::create(dir.join(format!("part_{i}.npy"))).expect("create shard file");
		table.write_npy(file).expect("write shard");
	}
}

/// Build a small bundle by positionally splitting a synthetic table.
pub fn synthetic_bundle(rows: usize, n_features: usize, test_fraction: f64, seed: u64) -> DatasetBundle {
	let table = synthetic_ctr_table(rows, n_features + 1, seed);
	let (x, y) = split_label_column(&table);
	let config = SplitConfig {
		test_fraction,
		shuffle: false,
		seed,
	};
	split(x, y, &config).expect("valid split configuration")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tables_are_deterministic_per_seed() {
		let a = synthetic_ctr_table(50, 4, 7);
		let b = synthetic_ctr_table(50, 4, 7);
		let c = synthetic_ctr_table(50, 4, 8);

		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[test]
	fn labels_are_binary_and_mixed() {
		let table = synthetic_ctr_table(500, 6, 42);
		let labels = table.column(0);

		assert!(labels.iter().all(|&l| l == 0.0 || l == 1.0));
		let positives = labels.iter().filter(|&&l| l == 1.0).count();
		assert!(positives > 50 && positives < 450);
	}

	#[test]
	fn shard_writer_lays_out_the_day_tree() {
		let root = tempfile::tempdir().unwrap();
		write_ctr_shards(root.path(), 0, &[10, 20], 5, 42);
		write_ctr_shards(root.path(), 1, &[30], 5, 42);

		assert!(root.path().join("etled/day_0/part_0.npy").is_file());
		assert!(root.path().join("etled/day_0/part_1.npy").is_file());
		assert!(root.path().join("etled/day_1/part_0.npy").is_file());
	}

	#[test]
	fn synthetic_bundle_partitions_all_rows() {
		let bundle = synthetic_bundle(100, 4, 0.25, 42);

		assert_eq!(bundle.n_train_rows(), 75);
		assert_eq!(bundle.n_test_rows(), 25);
		assert_eq!(bundle.n_features(), 4);
	}
}
