//! gbdt-rs adapter (`gbdt` crate).

use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;

use crate::data::DatasetBundle;
use crate::registry::GbdtParams;

use super::{TrainError, Trainer};

/// Trains a gbdt-rs log-likelihood model and predicts probabilities.
#[derive(Debug, Clone)]
pub struct GbdtTrainer {
	params: GbdtParams,
}

impl GbdtTrainer {
	pub fn new(params: GbdtParams) -> Self {
		Self { params }
	}
}

impl Trainer for GbdtTrainer {
	fn train_and_predict(&self, bundle: &DatasetBundle) -> Result<Vec<f32>, TrainError> {
		let mut config = Config::new();
		config.set_feature_size(bundle.n_features());
		config.set_max_depth(self.params.depth);
		config.set_iterations(self.params.iterations as usize);
		config.set_shrinkage(self.params.learning_rate);
		config.set_loss("LogLikelyhood");

		// The log-likelihood loss wants labels in {-1, 1}.
		let mut train: DataVec = bundle
			.x_train()
			.outer_iter()
			.zip(bundle.y_train().iter())
			.map(|(row, &label)| {
				let signed = if label > 0.5 { 1.0 } else { -1.0 };
				Data::new_training_data(row.to_vec(), 1.0, signed, None)
			})
			.collect();

		let test: DataVec = bundle
			.x_test()
			.outer_iter()
			.map(|row| Data::new_test_data(row.to_vec(), None))
			.collect();

		let mut model = GBDT::new(&config);
		model.fit(&mut train);

		// Predictions come back already passed through the logistic link.
		Ok(model.predict(&test))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::GbdtParams;
	use crate::testing::synthetic_bundle;

	#[test]
	fn trains_and_predicts_probabilities() {
		let bundle = synthetic_bundle(400, 8, 0.2, 42);
		let trainer = GbdtTrainer::new(GbdtParams {
			iterations: 10,
			..GbdtParams::base()
		});

		let preds = trainer.train_and_predict(&bundle).unwrap();

		assert_eq!(preds.len(), bundle.n_test_rows());
		assert!(preds.iter().all(|&prob| (0.0..=1.0).contains(&prob)));
	}
}
