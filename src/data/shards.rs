//! Shard discovery and loading.
//!
//! Shards are dense f32 `.npy` arrays of shape rows x (1 + features). The
//! file list is shuffled before loading so that concatenation approximates a
//! row shuffle across shard boundaries; row order inside a shard is
//! preserved. Downstream sampling relies on exactly this two-level ordering,
//! so do not replace it with a full row shuffle.

use std::fs::File;
use std::path::PathBuf;

use log::{debug, info};
use ndarray::{Array2, Axis};
use ndarray_npy::ReadNpyExt;
use rand::seq::SliceRandom;
use rand::Rng;

use super::error::DataLoadError;

/// How many shard paths to echo at debug level after shuffling.
const LOGGED_SHARD_SAMPLE: usize = 10;

/// Load every shard matching `pattern` and concatenate along the row axis.
///
/// The match list is permuted with `rng` before loading, so the resulting
/// row order is shard-level-shuffled. Fails if the pattern matches nothing,
/// a shard does not parse as a 2-D f32 array, or column counts disagree.
pub fn load_shards<R: Rng + ?Sized>(pattern: &str, rng: &mut R) -> Result<Array2<f32>, DataLoadError> {
	let mut files: Vec<PathBuf> = glob::glob(pattern)?.collect::<Result<_, _>>()?;
	if files.is_empty() {
		return Err(DataLoadError::NoMatches {
			pattern: pattern.to_string(),
		});
	}

	files.shuffle(rng);
	info!("matched {} shard files for `{}`", files.len(), pattern);
	debug!("shard order starts with {:?}", &files[..files.len().min(LOGGED_SHARD_SAMPLE)]);

	let mut shards: Vec<Array2<f32>> = Vec::with_capacity(files.len());
	let mut expected_cols: Option<usize> = None;

	for path in files {
		let file = File::open(&path)?;
		let shard = Array2::<f32>::read_npy(file).map_err(|source| DataLoadError::Npy {
			path: path.clone(),
			source,
		})?;

		match expected_cols {
			None => expected_cols = Some(shard.ncols()),
			Some(expected) if shard.ncols() != expected => {
				return Err(DataLoadError::ColumnCountMismatch {
					path,
					expected,
					got: shard.ncols(),
				});
			}
			Some(_) => {}
		}

		shards.push(shard);
	}

	let views: Vec<_> = shards.iter().map(|s| s.view()).collect();
	let table = ndarray::concatenate(Axis(0), &views)?;
	info!("raw table shape: {} rows x {} cols", table.nrows(), table.ncols());

	Ok(table)
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::Array2;
	use ndarray_npy::WriteNpyExt;
	use rand::rngs::StdRng;
	use rand::SeedableRng;
	use std::fs::File;
	use std::path::Path;

	fn write_shard(dir: &Path, name: &str, rows: usize, cols: usize, fill: f32) {
		let shard = Array2::<f32>::from_elem((rows, cols), fill);
		shard.write_npy(File::create(dir.join(name)).unwrap()).unwrap();
	}

	#[test]
	fn concatenates_all_rows_with_consistent_columns() {
		let dir = tempfile::tempdir().unwrap();
		write_shard(dir.path(), "part_0.npy", 2, 3, 1.0);
		write_shard(dir.path(), "part_1.npy", 3, 3, 2.0);

		let pattern = format!("{}/*.npy", dir.path().display());
		let mut rng = StdRng::seed_from_u64(7);
		let table = load_shards(&pattern, &mut rng).unwrap();

		assert_eq!(table.dim(), (5, 3));
	}

	#[test]
	fn preserves_row_order_within_each_shard() {
		let dir = tempfile::tempdir().unwrap();
		// Column 0 tags the shard, column 1 counts rows within it.
		for (name, tag, rows) in [("part_0.npy", 1.0f32, 4usize), ("part_1.npy", 2.0, 3)] {
			let shard = Array2::from_shape_fn((rows, 2), |(r, c)| if c == 0 { tag } else { r as f32 });
			shard.write_npy(File::create(dir.path().join(name)).unwrap()).unwrap();
		}

		let pattern = format!("{}/*.npy", dir.path().display());
		let mut rng = StdRng::seed_from_u64(3);
		let table = load_shards(&pattern, &mut rng).unwrap();

		assert_eq!(table.nrows(), 7);
		// Shards stay contiguous and each block counts 0, 1, 2, .. again.
		let boundary = table.column(0).iter().position(|&v| v != table[[0, 0]]).unwrap();
		for (i, row) in table.outer_iter().enumerate() {
			assert_eq!(row[0], if i < boundary { table[[0, 0]] } else { table[[boundary, 0]] });
			let expected = if i < boundary { i } else { i - boundary };
			assert_eq!(row[1], expected as f32);
		}
	}

	#[test]
	fn rejects_mismatched_column_counts() {
		let dir = tempfile::tempdir().unwrap();
		write_shard(dir.path(), "part_0.npy", 2, 3, 1.0);
		write_shard(dir.path(), "part_1.npy", 2, 4, 2.0);

		let pattern = format!("{}/*.npy", dir.path().display());
		let mut rng = StdRng::seed_from_u64(7);
		let err = load_shards(&pattern, &mut rng).unwrap_err();

		// Shuffle decides which shard sets the expectation; either way the
		// second one must be rejected.
		assert!(matches!(err, DataLoadError::ColumnCountMismatch { .. }));
	}

	#[test]
	fn rejects_empty_match() {
		let dir = tempfile::tempdir().unwrap();
		let pattern = format!("{}/*.npy", dir.path().display());
		let mut rng = StdRng::seed_from_u64(7);

		let err = load_shards(&pattern, &mut rng).unwrap_err();
		assert!(matches!(err, DataLoadError::NoMatches { .. }));
	}

	#[test]
	fn rejects_unparseable_shard() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("part_0.npy"), b"not an npy file").unwrap();

		let pattern = format!("{}/*.npy", dir.path().display());
		let mut rng = StdRng::seed_from_u64(7);

		let err = load_shards(&pattern, &mut rng).unwrap_err();
		assert!(matches!(err, DataLoadError::Npy { .. }));
	}
}
