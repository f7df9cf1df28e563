use crate::error::ConfigError;
use crate::net::{ArrivalSpec, Routing};
use crate::sim::{DistKind, ScenarioSpec, SimTime, TrialConfig};
use crate::topo::Preset;

#[test]
fn scenario_parses_minimal_json_with_defaults() {
    let raw = r#"
    {
        "schema_version": 1,
        "topology": { "kind": "linear" },
        "nodes": [ { "service": { "kind": "r", "mean": 180 } } ],
        "arrivals": { "kind": "single", "interval": { "kind": "e", "mean": 300 } }
    }
    "#;
    let spec: ScenarioSpec = serde_json::from_str(raw).expect("parse scenario");
    assert_eq!(spec.nodes.len(), 1);
    assert_eq!(spec.nodes[0].capacity, 1);
    assert_eq!(spec.nodes[0].service.kind, DistKind::Uniform);
    assert!(spec.meta.is_none());
    assert!(spec.run.is_none());

    let scenario = spec.build().expect("build");
    assert_eq!(scenario.name, "scenario");
    assert_eq!(scenario.trials, TrialConfig::default());
    assert_eq!(scenario.network.nodes().len(), 1);
    assert_eq!(scenario.network.routing(), &Routing::Linear);
}

#[test]
fn scenario_parses_fan_out_with_superposed_arrivals_and_run_overrides() {
    let raw = r#"
    {
        "schema_version": 1,
        "meta": { "name": "fan" },
        "topology": { "kind": "fan_out_fan_in", "entry": 0, "parallel": [1, 2], "merge": 3 },
        "nodes": [
            { "capacity": 1, "service": { "kind": "exponential", "mean": 180 } },
            { "capacity": 1, "service": { "kind": "exponential", "mean": 180 } },
            { "capacity": 1, "service": { "kind": "exponential", "mean": 180 } },
            { "capacity": 2, "service": { "kind": "constant", "mean": 60 } }
        ],
        "arrivals": {
            "kind": "superposed",
            "streams": [ { "kind": "e", "mean": 600 }, { "kind": "e", "mean": 600 } ]
        },
        "run": { "total_time": 5000, "trials": 3, "seed": 11 }
    }
    "#;
    let spec: ScenarioSpec = serde_json::from_str(raw).expect("parse scenario");
    let scenario = spec.build().expect("build");
    assert_eq!(scenario.name, "fan");
    assert_eq!(scenario.trials.total_time, SimTime(5_000));
    assert_eq!(scenario.trials.trials, 3);
    assert_eq!(scenario.trials.seed, 11);
    assert_eq!(scenario.trials.confidence, 0.95);
    assert_eq!(scenario.network.nodes()[3].capacity(), 2);
    assert!(matches!(
        scenario.network.arrivals().spec(),
        ArrivalSpec::Superposed { streams } if streams.len() == 2
    ));
}

#[test]
fn scenario_build_reports_configuration_errors() {
    let with = |nodes: &str, run: &str, version: u32| {
        let raw = format!(
            r#"{{
                "schema_version": {version},
                "topology": {{ "kind": "linear" }},
                "nodes": {nodes},
                "arrivals": {{ "kind": "single", "interval": {{ "kind": "c", "mean": 10 }} }},
                "run": {run}
            }}"#
        );
        let spec: ScenarioSpec = serde_json::from_str(&raw).expect("parse scenario");
        spec.build().map(|_| ())
    };
    let one = r#"[ { "service": { "kind": "c", "mean": 1 } } ]"#;

    assert_eq!(with(one, "{}", 1), Ok(()));
    assert_eq!(
        with(r#"[ { "capacity": 0, "service": { "kind": "c", "mean": 1 } } ]"#, "{}", 1),
        Err(ConfigError::ZeroCapacity)
    );
    assert_eq!(with("[]", "{}", 1), Err(ConfigError::EmptyNetwork));
    assert_eq!(
        with(one, r#"{ "trials": 1 }"#, 1),
        Err(ConfigError::TooFewTrials(1))
    );
    assert_eq!(with(one, "{}", 2), Err(ConfigError::UnsupportedSchema(2)));
    assert_eq!(
        with(r#"[ { "service": { "kind": "c", "mean": -3 } } ]"#, "{}", 1),
        Err(ConfigError::InvalidMean(-3.0))
    );
}

#[test]
fn scenario_with_zero_mean_arrivals_fails_to_build() {
    let with_arrivals = |arrivals: &str| {
        let raw = format!(
            r#"{{
                "schema_version": 1,
                "topology": {{ "kind": "linear" }},
                "nodes": [ {{ "service": {{ "kind": "c", "mean": 0 }} }} ],
                "arrivals": {arrivals}
            }}"#
        );
        let spec: ScenarioSpec = serde_json::from_str(&raw).expect("parse scenario");
        spec.build().map(|_| ())
    };

    // 服务均值为 0 是允许的
    assert_eq!(
        with_arrivals(r#"{ "kind": "single", "interval": { "kind": "c", "mean": 5 } }"#),
        Ok(())
    );
    assert_eq!(
        with_arrivals(r#"{ "kind": "single", "interval": { "kind": "c", "mean": 0 } }"#),
        Err(ConfigError::InvalidMean(0.0))
    );
    assert_eq!(
        with_arrivals(
            r#"{ "kind": "superposed", "streams": [ { "kind": "e", "mean": 600 }, { "kind": "e", "mean": 0 } ] }"#
        ),
        Err(ConfigError::InvalidMean(0.0))
    );
}

#[test]
fn unknown_distribution_kind_fails_to_parse() {
    let raw = r#"
    {
        "schema_version": 1,
        "topology": { "kind": "linear" },
        "nodes": [ { "service": { "kind": "weibull", "mean": 1 } } ],
        "arrivals": { "kind": "single", "interval": { "kind": "e", "mean": 1 } }
    }
    "#;
    let err = serde_json::from_str::<ScenarioSpec>(raw).expect_err("should fail");
    assert!(err.to_string().contains("weibull"), "{err}");
}

#[test]
fn presets_parse_and_build() {
    assert_eq!(Preset::parse("mm1").unwrap(), Preset::Mm1);
    assert_eq!(Preset::parse("MM1-uniform").unwrap(), Preset::Mm1Uniform);
    assert_eq!(Preset::parse("fan_out_fan_in").unwrap(), Preset::FanOutFanIn);
    assert_eq!(Preset::parse("linear").unwrap(), Preset::Tandem);
    assert!(Preset::parse("mystery").is_err());

    let expected_nodes = [1, 1, 1, 3, 4];
    for (preset, nodes) in Preset::ALL.into_iter().zip(expected_nodes) {
        let scenario = preset.build(TrialConfig::default()).expect("build preset");
        assert_eq!(scenario.name, preset.name());
        assert_eq!(scenario.network.nodes().len(), nodes, "{preset:?}");
        assert_eq!(Preset::parse(preset.name()).unwrap(), preset);
    }
    let mmc = Preset::Mmc.build(TrialConfig::default()).unwrap();
    assert_eq!(mmc.network.nodes()[0].capacity(), 4);
}
