//! Contract specifications for uncertain-volatility pricing.
//!
//! A [`ContractSpec`] bundles everything one finite-difference solve needs:
//! the volatility band, the rate, the payoff, the expiry, the grid
//! resolution, and the side of the trade. It can only be obtained through
//! [`ContractSpecBuilder::build`], which validates every field, so a solver
//! never sees inconsistent input.

use crate::payoff::{BasketPayoff, CashOrNothingPayoff, OptionType, Payoff, PlainVanillaPayoff};
use uv_core::{ensure, Error, Position, Rate, Real, Result, Size, Time, Volatility};

/// Smallest grid resolution that leaves room for the upper-boundary
/// extrapolation, which reads the two nodes below the top.
pub const MIN_ASSET_STEPS: Size = 4;

/// The payoff family of a contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractKind {
    /// European call or put.
    Vanilla(PlainVanillaPayoff),
    /// Digital paying `cash` above the strike.
    Binary(CashOrNothingPayoff),
    /// One digital plus two call legs.
    Basket(BasketPayoff),
}

impl ContractKind {
    /// A vanilla call.
    pub fn call(strike: Real) -> Self {
        ContractKind::Vanilla(PlainVanillaPayoff::new(OptionType::Call, strike))
    }

    /// A vanilla put.
    pub fn put(strike: Real) -> Self {
        ContractKind::Vanilla(PlainVanillaPayoff::new(OptionType::Put, strike))
    }

    /// A unit digital.
    pub fn binary(strike: Real) -> Self {
        ContractKind::Binary(CashOrNothingPayoff::new(strike, 1.0))
    }

    /// Resolve a single-strike contract from its name.
    ///
    /// Accepts `vanilla` / `call`, `put`, and `binary` / `digital`. Baskets
    /// carry three strikes and are built with [`ContractKind::Basket`].
    ///
    /// # Errors
    /// Any other name is a configuration error.
    pub fn from_name(name: &str, strike: Real) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "vanilla" | "call" => Ok(Self::call(strike)),
            "put" => Ok(Self::put(strike)),
            "binary" | "digital" => Ok(Self::binary(strike)),
            "basket" => Err(Error::Configuration(
                "a basket needs binary, low and high strikes; build it from a BasketPayoff"
                    .into(),
            )),
            other => Err(Error::Configuration(format!(
                "unrecognized contract kind '{other}'"
            ))),
        }
    }

    /// The strike whose double sets the top of the asset axis: the single
    /// strike, or the highest strike of a basket.
    pub fn reference_strike(&self) -> Real {
        match self {
            ContractKind::Vanilla(p) => p.strike,
            ContractKind::Binary(p) => p.strike,
            ContractKind::Basket(p) => p.high_strike(),
        }
    }

    /// The terminal payoff as a trait object.
    pub fn payoff(&self) -> &dyn Payoff {
        match self {
            ContractKind::Vanilla(p) => p as &dyn Payoff,
            ContractKind::Binary(p) => p,
            ContractKind::Basket(p) => p,
        }
    }

    fn strikes(&self) -> Vec<Real> {
        match self {
            ContractKind::Vanilla(p) => vec![p.strike],
            ContractKind::Binary(p) => vec![p.strike],
            ContractKind::Basket(p) => vec![p.binary.strike, p.low.strike, p.high.strike],
        }
    }
}

/// Validated input of one uncertain-volatility solve.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractSpec {
    vol_low: Volatility,
    vol_high: Volatility,
    rate: Rate,
    kind: ContractKind,
    expiration: Time,
    asset_steps: Size,
    position: Position,
}

impl ContractSpec {
    /// Start a builder for a contract of the given kind.
    pub fn builder(kind: ContractKind) -> ContractSpecBuilder {
        ContractSpecBuilder::new(kind)
    }

    /// Lower volatility bound.
    pub fn vol_low(&self) -> Volatility {
        self.vol_low
    }

    /// Upper volatility bound.
    pub fn vol_high(&self) -> Volatility {
        self.vol_high
    }

    /// Continuously compounded risk-free rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Payoff family.
    pub fn kind(&self) -> &ContractKind {
        &self.kind
    }

    /// Time to expiry in years.
    pub fn expiration(&self) -> Time {
        self.expiration
    }

    /// Number of asset steps (`NAS`).
    pub fn asset_steps(&self) -> Size {
        self.asset_steps
    }

    /// The side being valued.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Copy of this contract with another payoff, re-validated.
    pub fn with_kind(&self, kind: ContractKind) -> Result<Self> {
        ContractSpecBuilder {
            kind,
            ..ContractSpecBuilder::from(self)
        }
        .build()
    }
}

/// Builder for [`ContractSpec`].
///
/// Defaults: volatility band `[0.2, 0.3]`, rate 5 %, half a year to expiry,
/// 100 asset steps, long position.
#[derive(Debug, Clone)]
pub struct ContractSpecBuilder {
    vol_low: Volatility,
    vol_high: Volatility,
    rate: Rate,
    kind: ContractKind,
    expiration: Time,
    asset_steps: Size,
    position: Position,
}

impl ContractSpecBuilder {
    /// New builder with default parameters.
    pub fn new(kind: ContractKind) -> Self {
        Self {
            vol_low: 0.2,
            vol_high: 0.3,
            rate: 0.05,
            kind,
            expiration: 0.5,
            asset_steps: 100,
            position: Position::Long,
        }
    }

    /// Set the volatility band `[low, high]`.
    pub fn volatility_bounds(mut self, low: Volatility, high: Volatility) -> Self {
        self.vol_low = low;
        self.vol_high = high;
        self
    }

    /// Use a single volatility; the pricer then reduces to Black-Scholes.
    pub fn volatility(self, vol: Volatility) -> Self {
        self.volatility_bounds(vol, vol)
    }

    /// Set the risk-free rate.
    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = rate;
        self
    }

    /// Set the time to expiry.
    pub fn expiration(mut self, expiration: Time) -> Self {
        self.expiration = expiration;
        self
    }

    /// Set the number of asset steps.
    pub fn asset_steps(mut self, asset_steps: Size) -> Self {
        self.asset_steps = asset_steps;
        self
    }

    /// Set the side being valued.
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    /// Configuration error when `0 < vol_low <= vol_high` fails, the rate is
    /// not finite, a strike is not positive, the expiry is not positive, or
    /// `asset_steps < 4`.
    pub fn build(self) -> Result<ContractSpec> {
        ensure!(
            self.vol_low > 0.0 && self.vol_low.is_finite(),
            "lower volatility must be positive, got {}",
            self.vol_low
        );
        ensure!(
            self.vol_high.is_finite() && self.vol_low <= self.vol_high,
            "volatility bounds are inverted: low {} > high {}",
            self.vol_low,
            self.vol_high
        );
        ensure!(self.rate.is_finite(), "rate must be finite, got {}", self.rate);
        ensure!(
            self.expiration > 0.0 && self.expiration.is_finite(),
            "expiration must be positive, got {}",
            self.expiration
        );
        ensure!(
            self.asset_steps >= MIN_ASSET_STEPS,
            "asset steps must be greater than 3, got {}",
            self.asset_steps
        );
        for strike in self.kind.strikes() {
            ensure!(
                strike > 0.0 && strike.is_finite(),
                "strike must be positive, got {strike}"
            );
        }
        Ok(ContractSpec {
            vol_low: self.vol_low,
            vol_high: self.vol_high,
            rate: self.rate,
            kind: self.kind,
            expiration: self.expiration,
            asset_steps: self.asset_steps,
            position: self.position,
        })
    }
}

impl From<&ContractSpec> for ContractSpecBuilder {
    fn from(spec: &ContractSpec) -> Self {
        Self {
            vol_low: spec.vol_low,
            vol_high: spec.vol_high,
            rate: spec.rate,
            kind: spec.kind.clone(),
            expiration: spec.expiration,
            asset_steps: spec.asset_steps,
            position: spec.position,
        }
    }
}
