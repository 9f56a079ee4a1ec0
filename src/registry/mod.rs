//! The benchmark dispatch table.
//!
//! Each entry names one library/device combination with its full
//! hyperparameter set and scoring function. Enumerating the table never
//! touches the trainer crates, so it works with every backend feature
//! disabled; building a trainer for an entry is the job of
//! [`crate::trainers::build_trainer`].

pub mod params;

pub use params::{GbdtParams, LgbmParams, TrainerParams, XgbGrowPolicy, XgbParams, XgbTreeMethod};

use crate::metrics::{binary_class_metrics, binary_prob_metrics, MetricsFn};

/// Execution mode of a benchmark entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
	Cpu,
	Gpu,
}

impl Device {
	pub fn name(self) -> &'static str {
		match self {
			Device::Cpu => "cpu",
			Device::Gpu => "gpu",
		}
	}
}

/// One row of the benchmark table.
///
/// `enabled == false` entries are skipped by the runner; `disabled_reason`
/// records why (known crashes in specific library/device combinations).
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkSpec {
	pub name: &'static str,
	pub enabled: bool,
	pub disabled_reason: Option<&'static str>,
	pub device: Device,
	pub metrics_fn: MetricsFn,
	pub params: TrainerParams,
}

/// The full benchmark table, in declaration order.
pub fn benchmarks() -> Vec<BenchmarkSpec> {
	let nthreads = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);

	vec![
		BenchmarkSpec {
			name: "xgb-cpu",
			enabled: true,
			disabled_reason: None,
			device: Device::Cpu,
			metrics_fn: binary_prob_metrics,
			params: TrainerParams::Xgboost(XgbParams {
				nthread: Some(nthreads),
				..XgbParams::base()
			}),
		},
		BenchmarkSpec {
			name: "xgb-cpu-hist",
			enabled: true,
			disabled_reason: None,
			device: Device::Cpu,
			metrics_fn: binary_prob_metrics,
			params: TrainerParams::Xgboost(XgbParams {
				tree_method: XgbTreeMethod::Hist,
				grow_policy: XgbGrowPolicy::Lossguide,
				max_leaves: 256,
				nthread: Some(nthreads),
				..XgbParams::base()
			}),
		},
		BenchmarkSpec {
			name: "xgb-gpu",
			enabled: false,
			disabled_reason: Some("gpu_exact updater hits an illegal memory access on this dataset"),
			device: Device::Gpu,
			metrics_fn: binary_prob_metrics,
			params: TrainerParams::Xgboost(XgbParams {
				tree_method: XgbTreeMethod::GpuExact,
				..XgbParams::base()
			}),
		},
		BenchmarkSpec {
			name: "xgb-gpu-hist",
			enabled: true,
			disabled_reason: None,
			device: Device::Gpu,
			metrics_fn: binary_prob_metrics,
			params: TrainerParams::Xgboost(XgbParams {
				tree_method: XgbTreeMethod::GpuHist,
				..XgbParams::base()
			}),
		},
		BenchmarkSpec {
			name: "lgbm-cpu",
			enabled: true,
			disabled_reason: None,
			device: Device::Cpu,
			metrics_fn: binary_prob_metrics,
			params: TrainerParams::Lightgbm(LgbmParams {
				nthread: Some(nthreads),
				..LgbmParams::base()
			}),
		},
		BenchmarkSpec {
			name: "lgbm-gpu",
			enabled: true,
			disabled_reason: None,
			device: Device::Gpu,
			metrics_fn: binary_prob_metrics,
			params: TrainerParams::Lightgbm(LgbmParams {
				device: Device::Gpu,
				..LgbmParams::base()
			}),
		},
		BenchmarkSpec {
			name: "gbdt-cpu",
			enabled: true,
			disabled_reason: None,
			device: Device::Cpu,
			metrics_fn: binary_class_metrics,
			params: TrainerParams::Gbdt(GbdtParams::base()),
		},
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_are_unique_and_order_is_stable() {
		let table = benchmarks();
		let names: Vec<&str> = table.iter().map(|b| b.name).collect();

		let mut sorted = names.clone();
		sorted.sort_unstable();
		sorted.dedup();
		assert_eq!(sorted.len(), names.len());

		assert_eq!(
			names,
			vec![
				"xgb-cpu",
				"xgb-cpu-hist",
				"xgb-gpu",
				"xgb-gpu-hist",
				"lgbm-cpu",
				"lgbm-gpu",
				"gbdt-cpu"
			]
		);
	}

	#[test]
	fn disabled_entries_carry_a_reason() {
		for spec in benchmarks() {
			assert_eq!(spec.enabled, spec.disabled_reason.is_none(), "{}", spec.name);
		}

		let gpu_exact = benchmarks().into_iter().find(|b| b.name == "xgb-gpu").unwrap();
		assert!(!gpu_exact.enabled);
	}

	#[test]
	fn entry_params_apply_overrides_over_the_base() {
		let table = benchmarks();

		let cpu = table.iter().find(|b| b.name == "xgb-cpu").unwrap();
		let hist = table.iter().find(|b| b.name == "xgb-cpu-hist").unwrap();

		let (TrainerParams::Xgboost(cpu), TrainerParams::Xgboost(hist)) = (cpu.params, hist.params) else {
			panic!("xgb entries must carry XGBoost params");
		};
		assert_eq!(cpu.tree_method, XgbTreeMethod::Exact);
		assert_eq!(hist.tree_method, XgbTreeMethod::Hist);
		assert_eq!(hist.grow_policy, XgbGrowPolicy::Lossguide);
		assert_eq!(hist.max_leaves, 256);
		assert_eq!(cpu.eta, hist.eta);

		let lgbm_gpu = table.iter().find(|b| b.name == "lgbm-gpu").unwrap();
		let TrainerParams::Lightgbm(p) = lgbm_gpu.params else {
			panic!("lgbm entry must carry LightGBM params");
		};
		assert_eq!(p.device, Device::Gpu);
	}

	#[test]
	fn gbdt_entry_scores_hard_decisions() {
		// Distinguish the two metric paths by behavior: hard decisions make
		// the log loss collapse to the clamp bound.
		let y_true = [1.0, 0.0];
		let y_prob = [0.7, 0.2];

		let table = benchmarks();
		let gbdt = table.iter().find(|b| b.name == "gbdt-cpu").unwrap();
		let xgb = table.iter().find(|b| b.name == "xgb-cpu").unwrap();

		assert!((gbdt.metrics_fn)(&y_true, &y_prob).log_loss < 1e-10);
		assert!((xgb.metrics_fn)(&y_true, &y_prob).log_loss > 0.1);
	}

	#[test]
	fn entry_names_start_with_their_library_tag() {
		for spec in benchmarks() {
			let prefix = match spec.params.library() {
				"xgboost" => "xgb-",
				"lightgbm" => "lgbm-",
				"gbdt-rs" => "gbdt-",
				other => panic!("unexpected library tag: {other}"),
			};
			assert!(spec.name.starts_with(prefix), "{}: {}", spec.name, spec.params.library());
		}
	}
}
