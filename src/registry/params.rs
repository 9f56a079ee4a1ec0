//! Per-benchmark hyperparameter sets.
//!
//! Each library gets one immutable struct; entries derive from a shared
//! `base()` via struct update instead of mutating shared tables. The types
//! here are deliberately free of trainer-crate imports so the registry can
//! be enumerated with every backend feature disabled.

use super::Device;

/// XGBoost tree construction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XgbTreeMethod {
	Exact,
	Hist,
	GpuExact,
	GpuHist,
}

/// XGBoost node growth order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XgbGrowPolicy {
	Depthwise,
	Lossguide,
}

/// XGBoost hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XgbParams {
	pub eta: f32,
	pub gamma: f32,
	pub max_depth: u32,
	pub min_child_weight: u32,
	pub subsample: f32,
	pub colsample_bytree: f32,
	/// L2 regularization (`lambda`).
	pub reg_lambda: f32,
	/// L1 regularization (`alpha`).
	pub reg_alpha: f32,
	pub num_round: u32,
	pub tree_method: XgbTreeMethod,
	pub grow_policy: XgbGrowPolicy,
	/// 0 leaves the leaf count unbounded (library convention).
	pub max_leaves: u32,
	/// `None` lets the library pick its own thread count.
	pub nthread: Option<usize>,
}

impl XgbParams {
	/// Shared base all XGBoost entries start from.
	pub const fn base() -> Self {
		Self {
			eta: 0.2,
			gamma: 0.4,
			max_depth: 7,
			min_child_weight: 20,
			subsample: 0.8,
			colsample_bytree: 0.8,
			reg_lambda: 100.0,
			reg_alpha: 3.0,
			num_round: 200,
			tree_method: XgbTreeMethod::Exact,
			grow_policy: XgbGrowPolicy::Depthwise,
			max_leaves: 0,
			nthread: None,
		}
	}
}

/// LightGBM hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LgbmParams {
	pub learning_rate: f64,
	pub min_child_weight: f64,
	pub min_split_gain: f64,
	pub num_leaves: u32,
	pub num_round: u32,
	pub reg_lambda: f64,
	pub scale_pos_weight: f64,
	pub subsample: f64,
	/// Value for the library's `device_type` parameter.
	pub device: Device,
	pub nthread: Option<usize>,
}

impl LgbmParams {
	/// Shared base all LightGBM entries start from.
	pub const fn base() -> Self {
		Self {
			learning_rate: 0.1,
			min_child_weight: 30.0,
			min_split_gain: 0.1,
			num_leaves: 256,
			num_round: 200,
			reg_lambda: 1.0,
			scale_pos_weight: 2.0,
			subsample: 1.0,
			device: Device::Cpu,
			nthread: None,
		}
	}
}

/// gbdt-rs hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GbdtParams {
	pub depth: u32,
	pub iterations: u32,
	/// The library calls this shrinkage.
	pub learning_rate: f32,
}

impl GbdtParams {
	pub const fn base() -> Self {
		Self {
			depth: 8,
			iterations: 200,
			learning_rate: 0.1,
		}
	}
}

/// Which library an entry trains, together with its full parameter set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainerParams {
	Xgboost(XgbParams),
	Lightgbm(LgbmParams),
	Gbdt(GbdtParams),
}

impl TrainerParams {
	/// Short library tag for logs and reports.
	pub fn library(&self) -> &'static str {
		match self {
			TrainerParams::Xgboost(_) => "xgboost",
			TrainerParams::Lightgbm(_) => "lightgbm",
			TrainerParams::Gbdt(_) => "gbdt-rs",
		}
	}
}
