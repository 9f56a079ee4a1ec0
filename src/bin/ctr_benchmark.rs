//! Gradient boosting benchmark runner for the Criteo CTR dataset.
//!
//! Prepares the dataset once, then runs every registered library
//! configuration on the same train/test partition, timing training and
//! scoring the test predictions.
//!
//! Usage:
//!   cargo run --bin ctr_benchmark --release --features "bench-xgboost,bench-lightgbm,bench-gbdt" -- [options]
//!
//! Options:
//!   --data-root PATH     Directory containing the etled/ shard tree (default: data)
//!   --rows N             Rows to subsample from the loaded shards (default: 20000000)
//!   --test-fraction F    Share of sampled rows held out for testing (default: 0.01)
//!   --seed N             Seed for shard ordering and sampling (default: 42)
//!   --bench NAME         Run only the named benchmark (repeatable)
//!   --out PATH           Write results as JSON to this path
//!
//! Registry entries disabled for known library crashes are reported with
//! their reason; entries whose backend feature is compiled out are reported
//! as skipped.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use log::warn;
use serde::Serialize;

use ctr_bench::data::{prepare_with, DatasetBundle, PrepareConfig};
use ctr_bench::metrics::MetricsReport;
use ctr_bench::registry::{benchmarks, BenchmarkSpec};
use ctr_bench::trainers::{backend_feature, build_trainer};

// =============================================================================
// Result structures
// =============================================================================

#[derive(Debug, Serialize)]
struct RunRecord {
	name: &'static str,
	library: &'static str,
	device: &'static str,
	status: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	reason: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	elapsed_s: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	metrics: Option<MetricsReport>,
}

#[derive(Debug, Serialize)]
struct RunSummary {
	data_root: String,
	num_rows: usize,
	test_fraction: f64,
	seed: u64,
	n_train_rows: usize,
	n_test_rows: usize,
	n_features: usize,
	prepare_s: f64,
	runs: Vec<RunRecord>,
}

// =============================================================================
// Benchmark execution
// =============================================================================

fn run_one(spec: &BenchmarkSpec, bundle: &DatasetBundle) -> RunRecord {
	if !spec.enabled {
		let reason = spec.disabled_reason.unwrap_or("disabled in the registry");
		println!("disabled ({reason})");
		return RunRecord {
			name: spec.name,
			library: spec.params.library(),
			device: spec.device.name(),
			status: "disabled",
			reason: Some(reason.to_string()),
			elapsed_s: None,
			metrics: None,
		};
	}

	let Some(trainer) = build_trainer(&spec.params) else {
		let reason = format!("requires --features {}", backend_feature(&spec.params));
		println!("skipped ({reason})");
		return RunRecord {
			name: spec.name,
			library: spec.params.library(),
			device: spec.device.name(),
			status: "skipped",
			reason: Some(reason),
			elapsed_s: None,
			metrics: None,
		};
	};

	let start = Instant::now();
	match trainer.train_and_predict(bundle) {
		Ok(preds) => {
			let elapsed_s = start.elapsed().as_secs_f64();
			let report = (spec.metrics_fn)(bundle.y_test_slice(), &preds);
			println!("OK ({elapsed_s:.1}s, logloss {:.6})", report.log_loss);
			RunRecord {
				name: spec.name,
				library: spec.params.library(),
				device: spec.device.name(),
				status: "ok",
				reason: None,
				elapsed_s: Some(elapsed_s),
				metrics: Some(report),
			}
		}
		Err(err) => {
			println!("FAILED");
			warn!("{} failed: {err}", spec.name);
			RunRecord {
				name: spec.name,
				library: spec.params.library(),
				device: spec.device.name(),
				status: "failed",
				reason: Some(err.to_string()),
				elapsed_s: None,
				metrics: None,
			}
		}
	}
}

// =============================================================================
// Report generation
// =============================================================================

fn find_best(vals: &[Option<f64>], lower_is_better: bool) -> Option<usize> {
	let valids: Vec<(usize, f64)> = vals.iter().enumerate().filter_map(|(i, opt)| opt.map(|v| (i, v))).collect();

	if valids.is_empty() {
		return None;
	}

	let best = if lower_is_better {
		valids.iter().min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
	} else {
		valids.iter().max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
	};

	best.map(|(i, _)| *i)
}

fn format_cell(val: Option<f64>, precision: usize, is_best: bool) -> String {
	match val {
		Some(v) => {
			let cell = format!("{:.prec$}", v, prec = precision);
			if is_best { format!("**{}**", cell) } else { cell }
		}
		None => "-".to_string(),
	}
}

fn metric_column(records: &[RunRecord], select: fn(&MetricsReport) -> f64) -> Vec<Option<f64>> {
	records.iter().map(|r| r.metrics.as_ref().map(select)).collect()
}

fn render_report(records: &[RunRecord]) -> String {
	let best_logloss = find_best(&metric_column(records, |m| m.log_loss), true);
	let best_auc = find_best(&metric_column(records, |m| m.auc), false);
	let best_acc = find_best(&metric_column(records, |m| m.accuracy), false);
	let best_f1 = find_best(&metric_column(records, |m| m.f1), false);

	let mut out = String::new();
	out.push_str("| Benchmark | Library | Device | Status | Time (s) | LogLoss | AUC | Accuracy | F1 |\n");
	out.push_str("|-----------|---------|--------|--------|----------|---------|-----|----------|----|\n");

	for (i, r) in records.iter().enumerate() {
		out.push_str(&format!(
			"| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
			r.name,
			r.library,
			r.device,
			r.status,
			format_cell(r.elapsed_s, 1, false),
			format_cell(r.metrics.map(|m| m.log_loss), 6, best_logloss == Some(i)),
			format_cell(r.metrics.map(|m| m.auc), 4, best_auc == Some(i)),
			format_cell(r.metrics.map(|m| m.accuracy), 4, best_acc == Some(i)),
			format_cell(r.metrics.map(|m| m.f1), 4, best_f1 == Some(i)),
		));
	}

	out
}

// =============================================================================
// CLI
// =============================================================================

struct Args {
	data_root: PathBuf,
	num_rows: Option<usize>,
	test_fraction: Option<f64>,
	seed: Option<u64>,
	only: Vec<String>,
	out: Option<PathBuf>,
}

fn parse_args() -> Args {
	let mut data_root = PathBuf::from("data");
	let mut num_rows: Option<usize> = None;
	let mut test_fraction: Option<f64> = None;
	let mut seed: Option<u64> = None;
	let mut only: Vec<String> = Vec::new();
	let mut out: Option<PathBuf> = None;

	let mut it = std::env::args().skip(1);
	while let Some(arg) = it.next() {
		match arg.as_str() {
			"--data-root" => data_root = PathBuf::from(it.next().expect("--data-root path")),
			"--rows" => num_rows = Some(it.next().expect("--rows value").parse().unwrap()),
			"--test-fraction" => test_fraction = Some(it.next().expect("--test-fraction value").parse().unwrap()),
			"--seed" => seed = Some(it.next().expect("--seed value").parse().unwrap()),
			"--bench" => only.push(it.next().expect("--bench name")),
			"--out" => out = Some(PathBuf::from(it.next().expect("--out path"))),
			"--help" => {
				eprintln!(
					"ctr_benchmark\n\n  --data-root <path>    Directory containing the etled/ shard tree (default: data)\n  --rows <n>            Rows to subsample (default: 20000000)\n  --test-fraction <f>   Test share of the sample (default: 0.01)\n  --seed <n>            Seed for shard ordering and sampling (default: 42)\n  --bench <name>        Run only the named benchmark (repeatable)\n  --out <path>          Write results as JSON"
				);
				std::process::exit(0);
			}
			other => panic!("unknown arg: {other}"),
		}
	}

	Args { data_root, num_rows, test_fraction, seed, only, out }
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = parse_args();

	let mut config = PrepareConfig::new(&args.data_root);
	if let Some(rows) = args.num_rows {
		config.num_rows = rows;
	}
	if let Some(fraction) = args.test_fraction {
		config.test_fraction = fraction;
	}
	if let Some(seed) = args.seed {
		config.seed = seed;
	}

	let all = benchmarks();
	for name in &args.only {
		if !all.iter().any(|s| s.name == name.as_str()) {
			panic!("unknown benchmark: {name}");
		}
	}
	let specs: Vec<BenchmarkSpec> = all
		.into_iter()
		.filter(|s| args.only.is_empty() || args.only.iter().any(|n| n == s.name))
		.collect();

	println!("=== CTR Benchmark ===");
	println!("Shards: {}", config.shard_pattern());
	println!(
		"Sampling {} rows, test fraction {}, seed {}",
		config.num_rows, config.test_fraction, config.seed
	);
	println!();

	let prep_start = Instant::now();
	let bundle = match prepare_with(&config) {
		Ok(bundle) => bundle,
		Err(err) => {
			eprintln!("dataset preparation failed: {err}");
			std::process::exit(1);
		}
	};
	let prepare_s = prep_start.elapsed().as_secs_f64();
	println!(
		"Prepared {} train / {} test rows with {} features in {:.1}s",
		bundle.n_train_rows(),
		bundle.n_test_rows(),
		bundle.n_features(),
		prepare_s
	);
	println!();

	let mut runs: Vec<RunRecord> = Vec::new();
	for (i, spec) in specs.iter().enumerate() {
		print!("[{}/{}] {} ... ", i + 1, specs.len(), spec.name);
		std::io::stdout().flush().unwrap();
		runs.push(run_one(spec, &bundle));
	}

	let report = render_report(&runs);
	println!("\n{report}");

	let any_failed = runs.iter().any(|r| r.status == "failed");

	if let Some(path) = &args.out {
		let summary = RunSummary {
			data_root: args.data_root.display().to_string(),
			num_rows: config.num_rows,
			test_fraction: config.test_fraction,
			seed: config.seed,
			n_train_rows: bundle.n_train_rows(),
			n_test_rows: bundle.n_test_rows(),
			n_features: bundle.n_features(),
			prepare_s,
			runs,
		};
		let json = serde_json::to_string_pretty(&summary).expect("serialize results");
		fs::write(path, json).expect("failed to write results");
		println!("Results written to: {}", path.display());
	}

	if any_failed {
		std::process::exit(1);
	}
}
