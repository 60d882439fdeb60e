//! End-to-end runs of the static-hedge search on the default scenario:
//! a digital struck at 100 hedged with calls at 90 and 110, volatility in
//! `[0.2, 0.3]`, half a year to expiry.

use uv_hedging::{ExecutionMode, HedgeSearchConfig, StaticHedgeSearch, WeightRange};

#[test]
fn default_scan_finds_the_known_hedge() {
    let search = StaticHedgeSearch::new(HedgeSearchConfig::default()).unwrap();
    let result = search.run().unwrap();

    assert_eq!(result.evaluated, 90);
    assert_eq!(result.best_weights(), (-4, 4));
    assert!(result.best.value.abs() < 0.02, "best value {}", result.best.value);
    assert_eq!(
        (result.max_residual.candidate.i, result.max_residual.candidate.j),
        (-8, 6)
    );
    assert!(result.max_residual.residual >= result.best.residual);

    // The hedged digital is a probability-weighted payoff.
    let hedged = result.hedged_binary_value();
    assert!(hedged > 0.0 && hedged < 1.0, "hedged value {hedged}");
}

#[test]
fn repeated_runs_are_bit_identical() {
    let config = HedgeSearchConfig {
        low_weights: WeightRange::new(-6, -1),
        high_weights: WeightRange::new(2, 6),
        ..HedgeSearchConfig::default()
    };
    let search = StaticHedgeSearch::new(config).unwrap();
    let first = search.run().unwrap();
    let second = search.run().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.best.value.to_bits(), second.best.value.to_bits());
    assert_eq!(
        first.max_residual.residual.to_bits(),
        second.max_residual.residual.to_bits()
    );
}

#[test]
fn parallel_scan_matches_serial_scan() {
    let config = HedgeSearchConfig {
        low_weights: WeightRange::new(-8, -2),
        high_weights: WeightRange::new(1, 7),
        ..HedgeSearchConfig::default()
    };
    let search = StaticHedgeSearch::new(config).unwrap();
    let serial = search.run_with(ExecutionMode::Serial).unwrap();
    let parallel = search.run_with(ExecutionMode::Parallel).unwrap();

    assert_eq!(serial, parallel);
    assert_eq!(parallel.evaluated, 36);
}

#[test]
fn misaligned_spot_fails_before_solving() {
    let config = HedgeSearchConfig {
        spot: 101.0,
        ..HedgeSearchConfig::default()
    };
    let err = StaticHedgeSearch::new(config).unwrap_err();
    assert!(err.is_configuration(), "{err}");
}
