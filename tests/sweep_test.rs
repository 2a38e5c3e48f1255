//! Sensitivity sweeps over ownership and claims.

use goldcalc::estimator::{EstimationResult, EstimatorConfig, EstimatorError};
use goldcalc::sweep::{run_sweep, SweepParameter};

#[test]
fn test_owned_sweep_ends_at_max_rank() {
    let values: Vec<u32> = (0..=9).collect();
    let report = run_sweep(
        &EstimatorConfig::default(),
        SweepParameter::OwnedCopies,
        &values,
    )
    .unwrap();

    assert_eq!(report.points.len(), 10);
    let last = report.points.last().unwrap();
    assert_eq!(last.outcome, EstimationResult::AlreadySatisfied { owned: 9 });
    assert_eq!(last.chart_value(), 0.0);

    let series = report.series();
    assert!((series[0].1 - 187.26).abs() < 0.011);
    for pair in series[..9].windows(2) {
        assert!(pair[1].1 <= pair[0].1);
    }
}

#[test]
fn test_claimed_sweep_charts_infeasible_as_zero() {
    let values: Vec<u32> = (8..=11).collect();
    let report = run_sweep(
        &EstimatorConfig::default(),
        SweepParameter::ClaimedTargetCopies,
        &values,
    )
    .unwrap();

    let feasible: Vec<bool> = report.points.iter().map(|p| p.outcome.is_feasible()).collect();
    assert_eq!(feasible, vec![true, true, false, false]);
    assert!(report.points[1].chart_value() > report.points[0].chart_value());
    assert_eq!(report.points[2].chart_value(), 0.0);
    assert_eq!(
        report.points[2].outcome,
        EstimationResult::Infeasible {
            available: 8,
            needed: 9
        }
    );
}

#[test]
fn test_stock_sweeps_are_all_feasible() {
    for parameter in [
        SweepParameter::ClaimedTargetCopies,
        SweepParameter::ClaimedOtherSameCost,
    ] {
        let report = run_sweep(
            &EstimatorConfig::default(),
            parameter,
            &parameter.default_values(),
        )
        .unwrap();
        assert!(report
            .points
            .iter()
            .all(|p| p.outcome.as_estimate().is_some()));
    }
}

#[test]
fn test_invalid_base_config_propagates() {
    let base = EstimatorConfig {
        cost_tier_probability: 0.0,
        ..Default::default()
    };
    let err = run_sweep(&base, SweepParameter::OwnedCopies, &[0, 1]).unwrap_err();
    assert!(matches!(
        err,
        EstimatorError::InvalidConfig {
            field: "cost_tier_probability",
            ..
        }
    ));
}

#[test]
fn test_sweep_json_lists_every_point() {
    let report = run_sweep(
        &EstimatorConfig::default(),
        SweepParameter::ClaimedOtherSameCost,
        &[0, 50],
    )
    .unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
    assert_eq!(json["parameter"], "claimed_other_same_cost");
    assert_eq!(json["points"].as_array().unwrap().len(), 2);
    assert_eq!(json["points"][1]["value"], 50);
    assert_eq!(json["points"][1]["outcome"]["outcome"], "estimate");
}
