//! 排队网络仿真
//!
//! 运行预置场景或 scenario.json，输出每次试验的 L/Lq 与置信区间。

use clap::Parser;
use queuesim_rs::sim::{
    Scenario, ScenarioSpec, SimRng, SimTime, TrialConfig, TrialReport, TrialRunner,
};
use queuesim_rs::stats::IntervalEstimate;
use queuesim_rs::topo::Preset;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "queue-sim",
    about = "Simulate queueing networks and estimate L / Lq with confidence intervals"
)]
struct Args {
    /// Built-in scenario: mm1_uniform, mm1, mmc, tandem, fan_out_fan_in
    #[arg(long, default_value = "mm1_uniform", conflicts_with = "scenario")]
    preset: String,

    /// Path to scenario.json
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Simulated time per trial (seconds)
    #[arg(long)]
    total_time: Option<u64>,

    /// Number of independent trials (>= 2)
    #[arg(long)]
    trials: Option<u64>,

    /// Confidence level of the reported intervals
    #[arg(long)]
    confidence: Option<f64>,

    /// Seed of the random stream
    #[arg(long)]
    seed: Option<u64>,

    /// Write the full report as JSON
    #[arg(long)]
    report_json: Option<PathBuf>,
}

fn format_estimate(name: &str, est: &IntervalEstimate) -> String {
    match est {
        IntervalEstimate::Interval(ci) => format!(
            "{name} {} ({} ... {})",
            ci.midpoint(),
            ci.lower,
            ci.upper
        ),
        IntervalEstimate::Degenerate { mean } => {
            format!("{name} {mean} (interval undefined: zero variance)")
        }
    }
}

fn print_report(report: &TrialReport) {
    for (n, trial) in report.trials.iter().enumerate() {
        println!("trial {n}");
        for (i, node) in trial.nodes.iter().enumerate() {
            println!("  node {i} qmax: {} cmax: {}", node.qmax, node.cmax);
        }
        println!("  L = {}", trial.l);
        println!("  Lq = {}", trial.lq);
    }
    println!("{}", format_estimate("L", &report.l));
    println!("{}", format_estimate("Lq", &report.lq));
}

fn load_scenario(args: &Args) -> Result<Scenario, String> {
    let built = match &args.scenario {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("read {}: {e}", path.display()))?;
            let spec: ScenarioSpec = serde_json::from_str(&raw)
                .map_err(|e| format!("parse {}: {e}", path.display()))?;
            spec.build()
        }
        None => Preset::parse(&args.preset)?.build(TrialConfig::default()),
    };
    built.map_err(|e| format!("invalid configuration: {e}"))
}

fn run(args: Args) -> Result<(), String> {
    let mut scenario = load_scenario(&args)?;

    let mut config = scenario.trials;
    if let Some(t) = args.total_time {
        config.total_time = SimTime(t);
    }
    if let Some(n) = args.trials {
        config.trials = n;
    }
    if let Some(c) = args.confidence {
        config.confidence = c;
    }
    if let Some(s) = args.seed {
        config.seed = s;
    }
    let runner = TrialRunner::new(config).map_err(|e| format!("invalid configuration: {e}"))?;

    info!(
        scenario = %scenario.name,
        nodes = scenario.network.nodes().len(),
        "场景已加载"
    );

    let mut rng = SimRng::seed_from_u64(config.seed);
    let report = runner
        .run(&mut scenario.network, &mut rng)
        .map_err(|e| format!("statistics failed: {e}"))?;
    print_report(&report);

    if let Some(path) = &args.report_json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("serialize report: {e}"))?;
        fs::write(path, json).map_err(|e| format!("write {}: {e}", path.display()))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
