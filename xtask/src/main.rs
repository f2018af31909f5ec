use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "chaincopy workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the criterion benchmarks and write a markdown report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,

        /// Criterion baseline name to save and report on
        #[arg(long, default_value = "current")]
        baseline: String,
    },
    /// Run the test suite once per feature set
    Test,
}

/// The part of criterion's `estimates.json` the report needs.
#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// Each entry is one `cargo test` invocation; the feature-gated code only builds under its feature.
const TEST_FEATURES: &[&[&str]] = &[&[], &["--features", "tracing"]];

const BENCHES: &[&str] = &["deep_copy_benchmark", "table_benchmark"];

const REPORT_PATH: &str = "benchmark_results/report.md";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only, baseline } => {
            if !report_only {
                run_benchmarks(quick, &baseline)?;
            }
            generate_report(&baseline)?;
        }
        Commands::Test => run_tests()?,
    }

    Ok(())
}

fn run_tests() -> Result<()> {
    for features in TEST_FEATURES {
        println!("\n>>> cargo test {}", features.join(" "));
        let status = Command::new("cargo")
            .args(["test", "-p", "chaincopy"])
            .args(*features)
            .status()
            .context("failed to run cargo test")?;
        if !status.success() {
            anyhow::bail!("cargo test {} exited with {status}", features.join(" "));
        }
    }
    Ok(())
}

fn run_benchmarks(quick: bool, baseline: &str) -> Result<()> {
    for &bench in BENCHES {
        println!("\n>>> Running {bench}");
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0");
        cmd.args(["bench", "--bench", bench]);

        // Args for the test runner (Criterion) go after --
        cmd.arg("--");
        cmd.arg("--save-baseline").arg(baseline);

        if quick {
            cmd.arg("--measurement-time").arg("0.1");
            cmd.arg("--noplot");
            cmd.arg("--sample-size").arg("10");
        }

        let status = cmd.status().with_context(|| format!("failed to run bench {bench}"))?;
        if !status.success() {
            anyhow::bail!("benchmark {bench} exited with {status}");
        }
        println!("Finished {bench} in {:.2?}", start.elapsed());
    }

    Ok(())
}

fn generate_report(baseline: &str) -> Result<()> {
    println!("\n>>> Generating report for baseline '{baseline}'...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = BTreeMap::new();
    collect_results(criterion_dir, criterion_dir, baseline, &mut results)?;

    let report_path = Path::new(REPORT_PATH);
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut file = fs::File::create(report_path)
        .with_context(|| format!("creating {}", report_path.display()))?;

    writeln!(file, "# chaincopy Benchmark Report")?;
    writeln!(file)?;
    writeln!(file, "Baseline: `{baseline}`")?;
    writeln!(file)?;
    writeln!(file, "| Workload | Throughput |")?;
    writeln!(file, "|---|---|")?;

    for (workload, metric) in &results {
        writeln!(file, "| {workload} | {} |", format_rate(*metric))?;
    }

    println!("Report written to {} ({} workloads)", report_path.display(), results.len());
    Ok(())
}

fn format_rate(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M/s", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K/s", ops / 1_000.0)
    } else {
        format!("{ops:.0}/s")
    }
}

/// Walks criterion's output tree. Estimates live at
/// `<root>/<group>/<function>[/<parameter>]/<baseline>/estimates.json`.
fn collect_results(
    root: &Path,
    dir: &Path,
    baseline: &str,
    results: &mut BTreeMap<String, f64>,
) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(root, &path, baseline, results)?;
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        let Some(baseline_dir) = path.parent() else { continue };
        if baseline_dir.file_name().and_then(|s| s.to_str()) != Some(baseline) {
            continue;
        }
        let Some(workload_dir) = baseline_dir.parent() else { continue };
        let Ok(relative) = workload_dir.strip_prefix(root) else { continue };
        let workload = relative.to_string_lossy().replace('\\', "/");
        if workload.split('/').any(|part| part == "report") {
            continue;
        }

        // Throughput comes from the sibling benchmark.json, if the group declared one.
        let elements = fs::read_to_string(baseline_dir.join("benchmark.json"))
            .ok()
            .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
            .and_then(|json| json.get("throughput")?.get("Elements")?.as_f64());

        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let estimates: Estimates = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        let time_ns = estimates.mean.point_estimate;

        if time_ns > 0.0 {
            let metric = elements.unwrap_or(1.0) * 1e9 / time_ns;
            results.insert(workload, metric);
        }
    }

    Ok(())
}
