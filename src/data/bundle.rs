//! The train/test bundle handed to trainer adapters.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Subsampled, train/test-partitioned dataset.
///
/// This is the only long-lived artifact of the preparation pipeline: the raw
/// table and intermediate arrays are dropped once the bundle exists. Train
/// and test rows are a non-overlapping partition of the sampled subset.
#[derive(Debug, Clone)]
pub struct DatasetBundle {
	x_train: Array2<f32>,
	x_test: Array2<f32>,
	y_train: Array1<f32>,
	y_test: Array1<f32>,
}

impl DatasetBundle {
	/// Assemble a bundle from already-partitioned arrays.
	///
	/// Row counts of each feature block and its label vector must agree, and
	/// both blocks must have the same feature count.
	pub(crate) fn new(
		x_train: Array2<f32>,
		x_test: Array2<f32>,
		y_train: Array1<f32>,
		y_test: Array1<f32>,
	) -> Self {
		debug_assert_eq!(x_train.nrows(), y_train.len());
		debug_assert_eq!(x_test.nrows(), y_test.len());
		debug_assert_eq!(x_train.ncols(), x_test.ncols());
		Self {
			x_train,
			x_test,
			y_train,
			y_test,
		}
	}

	/// Number of training rows.
	pub fn n_train_rows(&self) -> usize {
		self.y_train.len()
	}

	/// Number of test rows.
	pub fn n_test_rows(&self) -> usize {
		self.y_test.len()
	}

	/// Number of feature columns (label excluded).
	pub fn n_features(&self) -> usize {
		self.x_train.ncols()
	}

	/// Training features, rows x features.
	pub fn x_train(&self) -> ArrayView2<'_, f32> {
		self.x_train.view()
	}

	/// Test features, rows x features.
	pub fn x_test(&self) -> ArrayView2<'_, f32> {
		self.x_test.view()
	}

	/// Training labels.
	pub fn y_train(&self) -> ArrayView1<'_, f32> {
		self.y_train.view()
	}

	/// Test labels.
	pub fn y_test(&self) -> ArrayView1<'_, f32> {
		self.y_test.view()
	}

	/// Training features as a row-major slice, for libraries that ingest
	/// flat buffers.
	pub fn x_train_slice(&self) -> &[f32] {
		self.x_train
			.as_slice()
			.expect("train features should be standard layout")
	}

	/// Test features as a row-major slice.
	pub fn x_test_slice(&self) -> &[f32] {
		self.x_test
			.as_slice()
			.expect("test features should be standard layout")
	}

	/// Training labels as a slice.
	pub fn y_train_slice(&self) -> &[f32] {
		self.y_train
			.as_slice()
			.expect("train labels should be standard layout")
	}

	/// Test labels as a slice.
	pub fn y_test_slice(&self) -> &[f32] {
		self.y_test
			.as_slice()
			.expect("test labels should be standard layout")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::array;

	#[test]
	fn accessors_report_partition_shapes() {
		let bundle = DatasetBundle::new(
			array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]],
			array![[7.0, 8.0]],
			array![0.0, 1.0, 0.0],
			array![1.0],
		);

		assert_eq!(bundle.n_train_rows(), 3);
		assert_eq!(bundle.n_test_rows(), 1);
		assert_eq!(bundle.n_features(), 2);
		assert_eq!(bundle.x_train_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
		assert_eq!(bundle.y_test_slice(), &[1.0]);
	}
}
