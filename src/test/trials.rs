use crate::error::ConfigError;
use crate::net::{ArrivalProcess, Network, Routing};
use crate::queue::QueueingNode;
use crate::sim::{Dist, SimRng, SimTime, TrialConfig, TrialRunner};
use crate::stats::IntervalEstimate;
use crate::topo::{FanOutFanInOpts, Preset, build_fan_out_fan_in};

fn config(total_time: u64, trials: u64, seed: u64) -> TrialConfig {
    TrialConfig {
        total_time: SimTime(total_time),
        trials,
        seed,
        ..TrialConfig::default()
    }
}

fn run_preset(preset: Preset, cfg: TrialConfig) -> crate::sim::TrialReport {
    let mut scenario = preset.build(cfg).expect("scenario");
    let runner = TrialRunner::new(cfg).expect("runner");
    let mut rng = SimRng::seed_from_u64(cfg.seed);
    runner.run(&mut scenario.network, &mut rng).expect("report")
}

#[test]
fn trial_config_is_validated() {
    assert_eq!(
        TrialRunner::new(config(100, 1, 0)).expect_err("one trial"),
        ConfigError::TooFewTrials(1)
    );
    assert_eq!(
        TrialRunner::new(config(0, 10, 0)).expect_err("zero horizon"),
        ConfigError::ZeroHorizon
    );
    let bad = TrialConfig {
        confidence: 1.0,
        ..TrialConfig::default()
    };
    assert_eq!(
        TrialRunner::new(bad).expect_err("confidence"),
        ConfigError::InvalidConfidence(1.0)
    );
    assert!(TrialRunner::new(TrialConfig::default()).is_ok());
}

#[test]
fn mm1_converges_to_analytic_mean() {
    // ρ = 180 / 300 = 0.6, L = ρ / (1 - ρ) = 1.5, Lq = ρ² / (1 - ρ) = 0.9
    let report = run_preset(Preset::Mm1, config(10_000_000, 10, 7));
    assert_eq!(report.trials.len(), 10);
    for t in &report.trials {
        assert!(t.l.is_finite() && t.l >= 0.0, "L={}", t.l);
        assert!(t.lq.is_finite() && t.lq >= 0.0, "Lq={}", t.lq);
        assert!(t.lq <= t.l);
        assert_eq!(t.nodes[0].cmax, 1);
    }
    let l = report.l.interval().expect("non-degenerate");
    assert!((l.mean - 1.5).abs() < 0.1, "L={l:?}");
    assert!(l.lower <= l.mean && l.mean <= l.upper);
    assert!(l.contains(1.5), "L={l:?}");
    assert!(l.half_width() < 0.2, "L={l:?}");
    assert!((report.lq.mean() - 0.9).abs() < 0.1, "Lq={:?}", report.lq);
}

#[test]
fn tandem_total_is_sum_of_stage_means() {
    // 三个独立的 M/M/1，每段 L = 1.5
    let report = run_preset(Preset::Tandem, config(10_000_000, 10, 3));
    let l = report.l.mean();
    assert!((l - 4.5).abs() < 0.4, "L={l}");
    for t in &report.trials {
        assert_eq!(t.nodes.len(), 3);
    }
}

#[test]
fn fan_out_fan_in_runs_and_balances_load() {
    let report = run_preset(Preset::FanOutFanIn, config(2_000_000, 4, 9));
    for t in &report.trials {
        let a = t.nodes[1].admitted as f64;
        let b = t.nodes[2].admitted as f64;
        assert!(a > 0.0 && b > 0.0);
        // 相等时偏向第一个并行节点，它至少分到一半
        assert!(a >= b * 0.9, "a={a} b={b}");
        assert_eq!(t.nodes[3].admitted, t.nodes[1].departed + t.nodes[2].departed);
    }
    assert!(report.l.mean() > 0.0);
}

#[test]
fn fan_out_never_routes_to_the_strictly_longer_queue_during_a_run() {
    // 0 号节点在并行节点推进之前路由，到达只进入 0 号节点，
    // 所以路由时看到的队长就是上一跳结束时的队长。
    let mut net = build_fan_out_fan_in(&FanOutFanInOpts::default()).expect("network");
    let mut rng = SimRng::seed_from_u64(21);
    let mut prev = (0usize, 0usize, 0u64, 0u64);
    let mut decisions = 0u64;
    let mut unequal = 0u64;
    net.run_observed(SimTime(1_000_000), &mut rng, |now, nodes| {
        let (q1, q2, a1, a2) = prev;
        let (n1, n2) = (nodes[1].stats().admitted, nodes[2].stats().admitted);
        assert!(n1 == a1 || n2 == a2, "two destinations in one jump at {now:?}");
        if n1 > a1 {
            assert!(q1 <= q2, "sent to node 1 with q1={q1} q2={q2} at {now:?}");
        }
        if n2 > a2 {
            assert!(q2 < q1, "sent to node 2 with q1={q1} q2={q2} at {now:?}");
        }
        if n1 > a1 || n2 > a2 {
            decisions += 1;
            if q1 != q2 {
                unequal += 1;
            }
        }
        prev = (nodes[1].queue_len(), nodes[2].queue_len(), n1, n2);
    });
    assert!(decisions > 1_000, "decisions={decisions}");
    assert!(unequal > 0, "no decision saw unequal queues");
}

#[test]
fn same_seed_gives_bit_identical_trials() {
    let cfg = config(300_000, 3, 42);
    let a = run_preset(Preset::Tandem, cfg);
    let b = run_preset(Preset::Tandem, cfg);
    let bits = |r: &crate::sim::TrialReport| {
        r.trials
            .iter()
            .map(|t| (t.l.to_bits(), t.lq.to_bits()))
            .collect::<Vec<_>>()
    };
    assert_eq!(bits(&a), bits(&b));

    let c = run_preset(Preset::Tandem, config(300_000, 3, 43));
    assert_ne!(bits(&a), bits(&c));
}

#[test]
fn trials_differ_because_the_stream_keeps_advancing() {
    let report = run_preset(Preset::Mm1, config(100_000, 3, 1));
    assert_ne!(report.trials[0].l.to_bits(), report.trials[1].l.to_bits());
}

#[test]
fn deterministic_network_reports_degenerate_interval() {
    let node = QueueingNode::new(2, Dist::constant(30.0).unwrap()).unwrap();
    let arrivals = ArrivalProcess::single(Dist::constant(20.0).unwrap()).unwrap();
    let mut net = Network::new(vec![node], Routing::Linear, arrivals).unwrap();
    let runner = TrialRunner::new(config(10_000, 3, 0)).unwrap();
    let mut rng = SimRng::seed_from_u64(0);
    let report = runner.run(&mut net, &mut rng).expect("report");

    for t in &report.trials {
        assert_eq!(t.lq, 0.0);
        assert_eq!(t.nodes[0].qmax, 0);
    }
    assert!(matches!(report.l, IntervalEstimate::Degenerate { .. }));
    assert_eq!(report.lq, IntervalEstimate::Degenerate { mean: 0.0 });
}

#[test]
fn report_serializes_with_interval_kinds() {
    let report = run_preset(Preset::Mm1Uniform, config(50_000, 2, 5));
    let v = serde_json::to_value(&report).expect("serialize");
    assert_eq!(v["total_time"], 50_000);
    assert_eq!(v["trials"].as_array().map(|a| a.len()), Some(2));
    assert_eq!(v["l"]["kind"], "interval");
    assert!(v["trials"][0]["nodes"][0]["qmax"].is_u64());
}
