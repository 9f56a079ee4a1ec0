//! Binary-classification metrics for benchmark scoring.
//!
//! All entry points take the held-out labels and the model output as flat
//! slices, so any trainer adapter's prediction vector can be scored without
//! conversion.

use serde::Serialize;

/// Scores computed on the test partition.
///
/// `log_loss` is lower-is-better; everything else higher-is-better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsReport {
	pub accuracy: f64,
	pub precision: f64,
	pub recall: f64,
	pub f1: f64,
	pub log_loss: f64,
	pub auc: f64,
}

/// Registry capability: score test labels against model output.
pub type MetricsFn = fn(&[f32], &[f32]) -> MetricsReport;

/// Decision threshold applied to probabilities.
const THRESHOLD: f32 = 0.5;

// =============================================================================
// Entry points
// =============================================================================

/// Score probability predictions.
///
/// Confusion-matrix metrics threshold at 0.5; log loss and AUC use the raw
/// probabilities.
pub fn binary_prob_metrics(y_true: &[f32], y_prob: &[f32]) -> MetricsReport {
	debug_assert_eq!(y_true.len(), y_prob.len());

	let (tp, fp, tn, fnn) = confusion_counts(y_true, y_prob);
	let n = y_true.len() as f64;

	let accuracy = if n > 0.0 { (tp + tn) as f64 / n } else { 0.0 };
	let precision = ratio(tp, tp + fp);
	let recall = ratio(tp, tp + fnn);
	let f1 = if precision + recall > 0.0 {
		2.0 * precision * recall / (precision + recall)
	} else {
		0.0
	};

	MetricsReport {
		accuracy,
		precision,
		recall,
		f1,
		log_loss: log_loss(y_true, y_prob),
		auc: roc_auc(y_prob, y_true),
	}
}

/// Score hard class decisions derived from probabilities.
///
/// Probabilities are collapsed to 0/1 at the threshold first and the whole
/// suite (log loss and AUC included) is computed on that hard vector. This
/// mirrors libraries whose output is a per-class score matrix reduced by
/// argmax before scoring.
pub fn binary_class_metrics(y_true: &[f32], y_prob: &[f32]) -> MetricsReport {
	let classes: Vec<f32> = y_prob
		.iter()
		.map(|&p| if p >= THRESHOLD { 1.0 } else { 0.0 })
		.collect();
	binary_prob_metrics(y_true, &classes)
}

// =============================================================================
// Individual metrics
// =============================================================================

/// Binary cross-entropy: -mean(y*log(p) + (1-y)*log(1-p)).
///
/// Probabilities are clamped away from 0 and 1 so the loss stays finite.
pub fn log_loss(y_true: &[f32], y_prob: &[f32]) -> f64 {
	if y_true.is_empty() {
		return 0.0;
	}

	const EPS: f64 = 1e-15;

	let sum: f64 = y_true
		.iter()
		.zip(y_prob.iter())
		.map(|(&l, &p)| {
			let p = (p as f64).clamp(EPS, 1.0 - EPS);
			let l = l as f64;
			-(l * p.ln() + (1.0 - l) * (1.0 - p).ln())
		})
		.sum();

	sum / y_true.len() as f64
}

/// Area under the ROC curve, with average ranks for tied predictions.
///
/// Returns 0.5 for inputs with a single class (ranking quality is
/// undefined there).
pub fn roc_auc(predictions: &[f32], labels: &[f32]) -> f64 {
	let n = predictions.len();

	let mut indices: Vec<usize> = (0..n).collect();
	indices.sort_by(|&a, &b| {
		predictions[b]
			.partial_cmp(&predictions[a])
			.unwrap_or(std::cmp::Ordering::Equal)
	});

	let n_pos = labels.iter().filter(|&&l| l > 0.5).count();
	let n_neg = n - n_pos;

	if n_pos == 0 || n_neg == 0 {
		return 0.5;
	}

	// Descending rank sum over positive samples, ties sharing their average
	// rank.
	let mut rank_sum_pos = 0.0f64;
	let mut i = 0;

	while i < n {
		let mut j = i + 1;
		while j < n && (predictions[indices[i]] - predictions[indices[j]]).abs() < 1e-10 {
			j += 1;
		}

		let avg_rank = (i + 1 + j) as f64 / 2.0;

		for &idx in indices.iter().take(j).skip(i) {
			if labels[idx] > 0.5 {
				rank_sum_pos += avg_rank;
			}
		}

		i = j;
	}

	let n_pos_f = n_pos as f64;
	let n_neg_f = n_neg as f64;
	let sum_ascending_ranks = n_pos_f * (n as f64 + 1.0) - rank_sum_pos;

	(sum_ascending_ranks - n_pos_f * (n_pos_f + 1.0) / 2.0) / (n_pos_f * n_neg_f)
}

fn confusion_counts(y_true: &[f32], y_prob: &[f32]) -> (u64, u64, u64, u64) {
	let mut tp = 0u64;
	let mut fp = 0u64;
	let mut tn = 0u64;
	let mut fnn = 0u64;

	for (&l, &p) in y_true.iter().zip(y_prob.iter()) {
		let predicted_pos = p >= THRESHOLD;
		let actual_pos = l > 0.5;
		match (actual_pos, predicted_pos) {
			(true, true) => tp += 1,
			(false, true) => fp += 1,
			(true, false) => fnn += 1,
			(false, false) => tn += 1,
		}
	}

	(tp, fp, tn, fnn)
}

fn ratio(num: u64, denom: u64) -> f64 {
	if denom > 0 {
		num as f64 / denom as f64
	} else {
		0.0
	}
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;

	#[test]
	fn log_loss_random_guess() {
		let ll = log_loss(&[1.0, 0.0], &[0.5, 0.5]);
		assert_abs_diff_eq!(ll, 0.693, epsilon = 0.01);
	}

	#[test]
	fn log_loss_confident_correct_is_small() {
		let ll = log_loss(&[1.0, 0.0], &[0.9999, 0.0001]);
		assert!(ll < 0.01);
	}

	#[test]
	fn log_loss_clamps_hard_zero_one() {
		let ll = log_loss(&[1.0, 0.0], &[1.0, 0.0]);
		assert!(ll.is_finite());
		assert!(ll < 1e-10);
	}

	#[test]
	fn auc_ranks_classic_case() {
		// Same case scikit-learn documents: expected 0.75.
		let auc = roc_auc(&[0.1, 0.4, 0.35, 0.8], &[0.0, 0.0, 1.0, 1.0]);
		assert_abs_diff_eq!(auc, 0.75, epsilon = 1e-9);
	}

	#[test]
	fn auc_perfect_and_inverted_ranking() {
		let labels = [0.0, 0.0, 1.0, 1.0];
		assert_abs_diff_eq!(roc_auc(&[0.1, 0.2, 0.8, 0.9], &labels), 1.0, epsilon = 1e-9);
		assert_abs_diff_eq!(roc_auc(&[0.9, 0.8, 0.2, 0.1], &labels), 0.0, epsilon = 1e-9);
	}

	#[test]
	fn auc_all_tied_is_half() {
		let auc = roc_auc(&[0.5, 0.5, 0.5, 0.5], &[0.0, 1.0, 0.0, 1.0]);
		assert_abs_diff_eq!(auc, 0.5, epsilon = 1e-9);
	}

	#[test]
	fn auc_single_class_is_half() {
		assert_abs_diff_eq!(roc_auc(&[0.2, 0.8], &[1.0, 1.0]), 0.5, epsilon = 1e-9);
	}

	#[test]
	fn prob_metrics_balanced_half_right() {
		let report = binary_prob_metrics(&[1.0, 0.0, 1.0, 0.0], &[0.9, 0.9, 0.1, 0.1]);

		assert_abs_diff_eq!(report.accuracy, 0.5, epsilon = 1e-9);
		assert_abs_diff_eq!(report.precision, 0.5, epsilon = 1e-9);
		assert_abs_diff_eq!(report.recall, 0.5, epsilon = 1e-9);
		assert_abs_diff_eq!(report.f1, 0.5, epsilon = 1e-9);
	}

	#[test]
	fn prob_metrics_no_positive_predictions() {
		let report = binary_prob_metrics(&[1.0, 0.0], &[0.2, 0.3]);
		assert_abs_diff_eq!(report.precision, 0.0, epsilon = 1e-9);
		assert_abs_diff_eq!(report.recall, 0.0, epsilon = 1e-9);
		assert_abs_diff_eq!(report.f1, 0.0, epsilon = 1e-9);
	}

	#[test]
	fn class_metrics_score_hard_decisions() {
		let report = binary_class_metrics(&[1.0, 0.0], &[0.7, 0.2]);

		assert_abs_diff_eq!(report.accuracy, 1.0, epsilon = 1e-9);
		assert_abs_diff_eq!(report.auc, 1.0, epsilon = 1e-9);
		// Hard decisions clamp to the eps bound, so the loss is near zero.
		assert!(report.log_loss < 1e-10);
	}

	#[test]
	fn empty_input_scores_zero() {
		let report = binary_prob_metrics(&[], &[]);
		assert_abs_diff_eq!(report.accuracy, 0.0, epsilon = 1e-9);
		assert_abs_diff_eq!(report.log_loss, 0.0, epsilon = 1e-9);
		assert_abs_diff_eq!(report.auc, 0.5, epsilon = 1e-9);
	}
}
