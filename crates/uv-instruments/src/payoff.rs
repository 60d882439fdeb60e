//! Option payoff hierarchy.
//!
//! Payoffs describe the terminal value of a contract as a function of the
//! underlying asset price. The finite-difference pricer samples them on its
//! asset axis to build the terminal condition.

use std::fmt;
use uv_core::Real;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// Base trait for terminal payoffs.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Compute the payoff given the underlying price at expiry.
    fn value(&self, price: Real) -> Real;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> String {
        self.name().to_string()
    }
}

/// Standard "plain vanilla" European option payoff.
///
/// `payoff = max(φ(S − K), 0)` where `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }
}

impl Payoff for PlainVanillaPayoff {
    fn value(&self, price: Real) -> Real {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }

    fn name(&self) -> &str {
        "Vanilla"
    }

    fn description(&self) -> String {
        format!("{} {} @ {}", self.name(), self.option_type, self.strike)
    }
}

/// Cash-or-nothing (digital) call payoff.
///
/// Pays `cash` when `S > K` and nothing otherwise. The comparison is
/// strict: an asset price exactly at the strike pays zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CashOrNothingPayoff {
    /// Strike price.
    pub strike: Real,
    /// Fixed cash payoff.
    pub cash: Real,
}

impl CashOrNothingPayoff {
    /// Create a new digital payoff.
    pub fn new(strike: Real, cash: Real) -> Self {
        Self { strike, cash }
    }
}

impl Payoff for CashOrNothingPayoff {
    fn value(&self, price: Real) -> Real {
        if price > self.strike {
            self.cash
        } else {
            0.0
        }
    }

    fn name(&self) -> &str {
        "CashOrNothing"
    }

    fn description(&self) -> String {
        format!("{} {} @ {}", self.name(), self.cash, self.strike)
    }
}

/// One digital leg hedged with two call legs.
///
/// `payoff = w_b·1{S > K_b} + w_1·max(S − K_low, 0) + w_2·max(S − K_high, 0)`
#[derive(Debug, Clone, PartialEq)]
pub struct BasketPayoff {
    /// The digital leg; its `cash` is the binary weight.
    pub binary: CashOrNothingPayoff,
    /// Low-strike call leg.
    pub low: PlainVanillaPayoff,
    /// Weight of the low-strike call.
    pub low_weight: Real,
    /// High-strike call leg.
    pub high: PlainVanillaPayoff,
    /// Weight of the high-strike call.
    pub high_weight: Real,
}

impl BasketPayoff {
    /// Create a basket of a unit-weight digital at `binary_strike` and
    /// calls at `low_strike` / `high_strike` with the given weights.
    pub fn new(
        binary_strike: Real,
        low_strike: Real,
        high_strike: Real,
        low_weight: Real,
        high_weight: Real,
    ) -> Self {
        Self {
            binary: CashOrNothingPayoff::new(binary_strike, 1.0),
            low: PlainVanillaPayoff::new(OptionType::Call, low_strike),
            low_weight,
            high: PlainVanillaPayoff::new(OptionType::Call, high_strike),
            high_weight,
        }
    }

    /// Replace the weight of the digital leg.
    pub fn with_binary_weight(mut self, weight: Real) -> Self {
        self.binary.cash = weight;
        self
    }

    /// The largest strike among the legs.
    pub fn high_strike(&self) -> Real {
        self.high.strike.max(self.low.strike).max(self.binary.strike)
    }
}

impl Payoff for BasketPayoff {
    fn value(&self, price: Real) -> Real {
        self.binary.value(price)
            + self.low_weight * self.low.value(price)
            + self.high_weight * self.high.value(price)
    }

    fn name(&self) -> &str {
        "Basket"
    }

    fn description(&self) -> String {
        format!(
            "{} [{}] + {} × [{}] + {} × [{}]",
            self.name(),
            self.binary.description(),
            self.low_weight,
            self.low.description(),
            self.high_weight,
            self.high.description()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_vanilla_call() {
        let p = PlainVanillaPayoff::new(OptionType::Call, 100.0);
        assert!((p.value(110.0) - 10.0).abs() < 1e-15);
        assert!((p.value(90.0) - 0.0).abs() < 1e-15);
        assert!((p.value(100.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn plain_vanilla_put() {
        let p = PlainVanillaPayoff::new(OptionType::Put, 100.0);
        assert!((p.value(90.0) - 10.0).abs() < 1e-15);
        assert!((p.value(110.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn digital_is_strict_at_strike() {
        let p = CashOrNothingPayoff::new(100.0, 1.0);
        assert_eq!(p.value(100.0), 0.0);
        assert_eq!(p.value(100.000_001), 1.0);
        assert_eq!(p.value(0.0), 0.0);
    }

    #[test]
    fn basket_superposes_legs() {
        let b = BasketPayoff::new(100.0, 90.0, 110.0, -0.05, 0.05);
        // Below every strike only zeros
        assert_eq!(b.value(80.0), 0.0);
        // Between 90 and 100: low call only
        assert!((b.value(96.0) - (-0.05 * 6.0)).abs() < 1e-15);
        // Above 110: every leg active
        let expected = 1.0 - 0.05 * 30.0 + 0.05 * 10.0;
        assert!((b.value(120.0) - expected).abs() < 1e-12);
        assert_eq!(b.high_strike(), 110.0);
    }

    #[test]
    fn basket_binary_weight() {
        let b = BasketPayoff::new(100.0, 90.0, 110.0, 0.0, 0.0).with_binary_weight(-2.0);
        assert_eq!(b.value(105.0), -2.0);
        assert!(b.description().starts_with("Basket [CashOrNothing -2 @ 100]"));
    }
}
