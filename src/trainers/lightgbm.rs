//! LightGBM adapter (`lightgbm3` crate).

use lightgbm3::{Booster, Dataset};
use serde_json::json;

use crate::data::DatasetBundle;
use crate::registry::LgbmParams;

use super::{TrainError, Trainer};

const LIBRARY: &str = "lightgbm";

/// Trains a binary-objective LightGBM booster and predicts probabilities.
#[derive(Debug, Clone)]
pub struct LightgbmTrainer {
	params: LgbmParams,
}

impl LightgbmTrainer {
	pub fn new(params: LgbmParams) -> Self {
		Self { params }
	}
}

impl Trainer for LightgbmTrainer {
	fn train_and_predict(&self, bundle: &DatasetBundle) -> Result<Vec<f32>, TrainError> {
		let p = &self.params;
		let cols = bundle.n_features() as i32;

		let x_train: Vec<f64> = bundle.x_train_slice().iter().map(|&v| v as f64).collect();
		let dataset = Dataset::from_slice(&x_train, bundle.y_train_slice(), cols, true)
			.map_err(|e| TrainError::library(LIBRARY, e))?;
		drop(x_train);

		// Canonical parameter names; the historical config used the
		// sklearn-style aliases.
		let mut params = json!({
			"objective": "binary",
			"num_iterations": p.num_round,
			"learning_rate": p.learning_rate,
			"num_leaves": p.num_leaves,
			"min_sum_hessian_in_leaf": p.min_child_weight,
			"min_gain_to_split": p.min_split_gain,
			"lambda_l2": p.reg_lambda,
			"scale_pos_weight": p.scale_pos_weight,
			"bagging_fraction": p.subsample,
			"device_type": p.device.name(),
			"verbosity": -1,
		});
		if let Some(threads) = p.nthread {
			params["num_threads"] = serde_json::Value::from(threads);
		}

		let booster = Booster::train(dataset, &params).map_err(|e| TrainError::library(LIBRARY, e))?;

		let x_test: Vec<f64> = bundle.x_test_slice().iter().map(|&v| v as f64).collect();
		let preds = booster
			.predict(&x_test, cols, true)
			.map_err(|e| TrainError::library(LIBRARY, e))?;

		Ok(preds.into_iter().map(|v| v as f32).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::LgbmParams;
	use crate::testing::synthetic_bundle;

	#[test]
	fn trains_and_predicts_probabilities() {
		let bundle = synthetic_bundle(400, 8, 0.2, 42);
		let trainer = LightgbmTrainer::new(LgbmParams {
			num_round: 10,
			nthread: Some(1),
			..LgbmParams::base()
		});

		let preds = trainer.train_and_predict(&bundle).unwrap();

		assert_eq!(preds.len(), bundle.n_test_rows());
		assert!(preds.iter().all(|&prob| (0.0..=1.0).contains(&prob)));
	}
}
