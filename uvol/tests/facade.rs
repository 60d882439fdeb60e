//! The façade re-exports and the bundled sample configuration.

use approx::assert_abs_diff_eq;
use uvol::core::Position;
use uvol::hedging::{HedgeSearchConfig, StaticHedgeSearch};
use uvol::instruments::{ContractKind, ContractSpec};
use uvol::methods::UncertainVolatilitySolver;
use uvol::pricingengines::black_scholes_call;

#[test]
fn sample_config_matches_defaults() {
    let config: HedgeSearchConfig = toml::from_str(include_str!("../hedge.toml")).unwrap();
    assert_eq!(config, HedgeSearchConfig::default());
    assert!(StaticHedgeSearch::new(config).is_ok());
}

#[test]
fn constant_band_call_through_the_facade() {
    let spec = ContractSpec::builder(ContractKind::call(100.0))
        .volatility(0.25)
        .asset_steps(200)
        .position(Position::Long)
        .build()
        .unwrap();
    let fd = UncertainVolatilitySolver::default()
        .price_at(&spec, 100.0)
        .unwrap();
    let bs = black_scholes_call(100.0, 100.0, 0.5, 0.05, 0.25);
    assert_abs_diff_eq!(fd, bs, epsilon = 5e-3);
}
