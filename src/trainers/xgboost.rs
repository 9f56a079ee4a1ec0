//! XGBoost adapter (`xgb` crate).

use xgb::parameters::tree::{GrowPolicy, TreeBoosterParametersBuilder, TreeMethod};
use xgb::parameters::{
	learning::LearningTaskParametersBuilder, learning::Objective, BoosterParametersBuilder, BoosterType,
	TrainingParametersBuilder,
};
use xgb::{Booster, DMatrix};

use crate::data::DatasetBundle;
use crate::registry::{XgbGrowPolicy, XgbParams, XgbTreeMethod};

use super::{TrainError, Trainer};

const LIBRARY: &str = "xgboost";

/// Trains a binary-logistic XGBoost booster and predicts probabilities.
#[derive(Debug, Clone)]
pub struct XgboostTrainer {
	params: XgbParams,
}

impl XgboostTrainer {
	pub fn new(params: XgbParams) -> Self {
		Self { params }
	}
}

fn tree_method(method: XgbTreeMethod) -> TreeMethod {
	match method {
		XgbTreeMethod::Exact => TreeMethod::Exact,
		XgbTreeMethod::Hist => TreeMethod::Hist,
		XgbTreeMethod::GpuExact => TreeMethod::GpuExact,
		XgbTreeMethod::GpuHist => TreeMethod::GpuHist,
	}
}

fn grow_policy(policy: XgbGrowPolicy) -> GrowPolicy {
	match policy {
		XgbGrowPolicy::Depthwise => GrowPolicy::Depthwise,
		XgbGrowPolicy::Lossguide => GrowPolicy::Lossguide,
	}
}

impl Trainer for XgboostTrainer {
	fn train_and_predict(&self, bundle: &DatasetBundle) -> Result<Vec<f32>, TrainError> {
		let p = &self.params;

		let tree_params = TreeBoosterParametersBuilder::default()
			.eta(p.eta)
			.gamma(p.gamma)
			.max_depth(p.max_depth)
			.min_child_weight(p.min_child_weight as f32)
			.subsample(p.subsample)
			.colsample_bytree(p.colsample_bytree)
			.lambda(p.reg_lambda)
			.alpha(p.reg_alpha)
			.tree_method(tree_method(p.tree_method))
			.grow_policy(grow_policy(p.grow_policy))
			.max_leaves(p.max_leaves)
			.build()
			.map_err(|e| TrainError::library(LIBRARY, e))?;

		let learning_params = LearningTaskParametersBuilder::default()
			.objective(Objective::BinaryLogistic)
			.build()
			.map_err(|e| TrainError::library(LIBRARY, e))?;

		let booster_params = BoosterParametersBuilder::default()
			.booster_type(BoosterType::Tree(tree_params))
			.learning_params(learning_params)
			.verbose(false)
			.threads(p.nthread.map(|n| n as u32))
			.build()
			.map_err(|e| TrainError::library(LIBRARY, e))?;

		let mut dtrain = DMatrix::from_dense(bundle.x_train_slice(), bundle.n_train_rows())
			.map_err(|e| TrainError::library(LIBRARY, e))?;
		dtrain
			.set_labels(bundle.y_train_slice())
			.map_err(|e| TrainError::library(LIBRARY, e))?;

		let training_params = TrainingParametersBuilder::default()
			.dtrain(&dtrain)
			.boost_rounds(p.num_round)
			.booster_params(booster_params)
			.evaluation_sets(None)
			.build()
			.map_err(|e| TrainError::library(LIBRARY, e))?;

		let model = Booster::train(&training_params).map_err(|e| TrainError::library(LIBRARY, e))?;

		let dtest = DMatrix::from_dense(bundle.x_test_slice(), bundle.n_test_rows())
			.map_err(|e| TrainError::library(LIBRARY, e))?;
		let preds = model.predict(&dtest).map_err(|e| TrainError::library(LIBRARY, e))?;

		Ok(preds.into_iter().map(|v| v as f32).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::XgbParams;
	use crate::testing::synthetic_bundle;

	#[test]
	fn trains_and_predicts_probabilities() {
		let bundle = synthetic_bundle(400, 8, 0.2, 42);
		let trainer = XgboostTrainer::new(XgbParams {
			num_round: 10,
			nthread: Some(1),
			..XgbParams::base()
		});

		let preds = trainer.train_and_predict(&bundle).unwrap();

		assert_eq!(preds.len(), bundle.n_test_rows());
		assert!(preds.iter().all(|&prob| (0.0..=1.0).contains(&prob)));
	}
}
