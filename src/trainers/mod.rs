//! Trainer adapters over the external gradient-boosting libraries.
//!
//! Each adapter wraps one library behind the [`Trainer`] trait: fit on the
//! train partition, predict the test partition, hand back a flat prediction
//! vector. The libraries are optional dependencies; with a backend feature
//! off, [`build_trainer`] reports the entry as unavailable instead of
//! failing the build.

#[cfg(feature = "bench-gbdt")]
pub mod gbdt_rs;
#[cfg(feature = "bench-lightgbm")]
pub mod lightgbm;
#[cfg(feature = "bench-xgboost")]
pub mod xgboost;

use crate::data::DatasetBundle;
use crate::registry::TrainerParams;

/// Training/prediction failure inside an external library.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
	#[error("{library} training failed: {message}")]
	Library { library: &'static str, message: String },
}

impl TrainError {
	#[allow(dead_code)] // only constructed by feature-gated adapters
	pub(crate) fn library(library: &'static str, err: impl std::fmt::Display) -> Self {
		Self::Library {
			library,
			message: err.to_string(),
		}
	}
}

/// External collaborator fitting one gradient-boosting library.
pub trait Trainer {
	/// Fit on the train partition and return one prediction per test row.
	fn train_and_predict(&self, bundle: &DatasetBundle) -> Result<Vec<f32>, TrainError>;
}

/// Cargo feature that compiles the backend for `params`.
pub fn backend_feature(params: &TrainerParams) -> &'static str {
	match params {
		TrainerParams::Xgboost(_) => "bench-xgboost",
		TrainerParams::Lightgbm(_) => "bench-lightgbm",
		TrainerParams::Gbdt(_) => "bench-gbdt",
	}
}

/// Construct the adapter for `params`, or `None` when its backend feature
/// is compiled out.
pub fn build_trainer(params: &TrainerParams) -> Option<Box<dyn Trainer>> {
	match params {
		TrainerParams::Xgboost(p) => {
			#[cfg(feature = "bench-xgboost")]
			{
				Some(Box::new(xgboost::XgboostTrainer::new(*p)))
			}
			#[cfg(not(feature = "bench-xgboost"))]
			{
				let _ = p;
				None
			}
		}
		TrainerParams::Lightgbm(p) => {
			#[cfg(feature = "bench-lightgbm")]
			{
				Some(Box::new(lightgbm::LightgbmTrainer::new(*p)))
			}
			#[cfg(not(feature = "bench-lightgbm"))]
			{
				let _ = p;
				None
			}
		}
		TrainerParams::Gbdt(p) => {
			#[cfg(feature = "bench-gbdt")]
			{
				Some(Box::new(gbdt_rs::GbdtTrainer::new(*p)))
			}
			#[cfg(not(feature = "bench-gbdt"))]
			{
				let _ = p;
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::benchmarks;

	#[test]
	fn every_entry_names_its_backend_feature() {
		for spec in benchmarks() {
			let feature = backend_feature(&spec.params);
			assert!(feature.starts_with("bench-"), "{}: {}", spec.name, feature);
		}
	}

	#[cfg(not(any(feature = "bench-xgboost", feature = "bench-lightgbm", feature = "bench-gbdt")))]
	#[test]
	fn all_backends_compiled_out_by_default() {
		for spec in benchmarks() {
			assert!(build_trainer(&spec.params).is_none(), "{}", spec.name);
		}
	}
}
