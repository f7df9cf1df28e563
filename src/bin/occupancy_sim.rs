//! 单站占用仿真
//!
//! 固定场内人数，比较指数/均匀/常数停留时间下的有效到达间隔。

use clap::Parser;
use queuesim_rs::occupancy::{OccupancyOpts, OccupancySim};
use queuesim_rs::sim::{DistKind, SimRng, SimTime};
use queuesim_rs::stats::{DEFAULT_CONFIDENCE, IntervalEstimate};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "occupancy-sim",
    about = "Fixed-population occupancy simulation (Little's law check)"
)]
struct Args {
    /// 场内人数上限
    #[arg(long, default_value_t = 60)]
    population: usize,
    /// 平均停留时间（分钟）
    #[arg(long, default_value_t = 300)]
    mean_stay_mins: u64,
    /// 每次试验的仿真时间（秒）
    #[arg(long, default_value_t = 10_000_000)]
    total_time: u64,
    #[arg(long, default_value_t = 10)]
    trials: u64,
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn run(args: Args) -> Result<(), String> {
    let opts = OccupancyOpts {
        population: args.population,
        mean_stay: SimTime::from_mins(args.mean_stay_mins).as_f64(),
        kinds: DistKind::ALL.to_vec(),
        total_time: SimTime(args.total_time),
    };
    let sim = OccupancySim::new(opts).map_err(|e| format!("invalid configuration: {e}"))?;

    let mut rng = SimRng::seed_from_u64(args.seed);
    let (runs, summaries) = sim
        .run_trials(args.trials, args.confidence, &mut rng)
        .map_err(|e| format!("statistics failed: {e}"))?;

    let kinds = &sim.opts().kinds;
    let header: Vec<String> = kinds.iter().map(|k| format!("{:>7}", k.label())).collect();
    println!("        {}", header.join(" "));
    for run in &runs {
        let lambda: Vec<String> = run.iter().map(|o| format!("{:>7.6}", o.interarrival)).collect();
        let min: Vec<String> = run.iter().map(|o| format!("{:>7}", o.min_stay as u64)).collect();
        let max: Vec<String> = run.iter().map(|o| format!("{:>7}", o.max_stay as u64)).collect();
        println!("lambda  {}", lambda.join(" "));
        println!("     min {}", min.join(" "));
        println!("     max {}", max.join(" "));
    }
    for s in &summaries {
        match s.interarrival {
            IntervalEstimate::Interval(ci) => println!(
                "{} {} ({} ... {})",
                s.kind.label(),
                ci.midpoint(),
                ci.lower,
                ci.upper
            ),
            IntervalEstimate::Degenerate { mean } => {
                println!("{} {mean} (interval undefined: zero variance)", s.kind.label())
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
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
