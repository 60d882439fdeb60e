//! Analytic European option prices (Black-Scholes-Merton).
//!
//! These closed forms are the reference the finite-difference pricer is
//! checked against when the volatility band collapses to a point, and they
//! price the vanilla hedge legs in the static-hedge search.

use uv_core::{Rate, Real, Time, Volatility};
use uv_instruments::OptionType;
use uv_math::distributions::normal_cdf;

/// Black-Scholes-Merton price of a European option.
///
/// $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Real {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        return (phi * (spot - strike)).max(0.0);
    }

    let r = risk_free_rate;
    let q = dividend_yield;
    let std_dev = volatility * t.sqrt();
    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();

    let (d1, d2) = if std_dev > 1e-15 {
        let d1 = ((spot / strike).ln() + (r - q + 0.5 * volatility * volatility) * t) / std_dev;
        (d1, d1 - std_dev)
    } else {
        let fwd = spot * ((r - q) * t).exp();
        let big = if fwd > strike { 1e15 } else { -1e15 };
        (big, big)
    };

    phi * (spot * df_q * normal_cdf(phi * d1) - strike * df_r * normal_cdf(phi * d2))
}

/// Black-Scholes price of a European call on a non-dividend stock.
///
/// Argument order follows `price(spot, strike, time, rate, vol)`.
pub fn black_scholes_call(
    spot: Real,
    strike: Real,
    time: Time,
    rate: Rate,
    vol: Volatility,
) -> Real {
    black_scholes_merton(OptionType::Call, spot, strike, rate, 0.0, vol, time)
}

/// Black-Scholes price of a cash-or-nothing call paying `cash` if `S_T > K`.
///
/// `cash · e^{-rT} · N(d_2)`
pub fn cash_or_nothing_price(
    spot: Real,
    strike: Real,
    cash: Real,
    time: Time,
    rate: Rate,
    vol: Volatility,
) -> Real {
    if time <= 0.0 {
        return if spot > strike { cash } else { 0.0 };
    }
    let std_dev = vol * time.sqrt();
    let d2 = ((spot / strike).ln() + (rate - 0.5 * vol * vol) * time) / std_dev;
    cash * (-rate * time).exp() * normal_cdf(d2)
}
