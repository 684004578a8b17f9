//! Black-Scholes pricing backend.
//!
//! The calculator consumes pricing through the [`PricingModel`] trait, so
//! the backend is fixed at construction time rather than probed per call.
//! Volatility is a decimal fraction everywhere in this module; theta is
//! quoted per calendar day, vega per volatility point, rho per percentage
//! point of rate.

use std::f64::consts::PI;

use thiserror::Error;

use crate::{Greeks, OptionSide};

const MIN_VOL: f64 = 0.01;
const MAX_VOL: f64 = 5.0;
const IV_MAX_ITERATIONS: u32 = 100;
const IV_TOLERANCE: f64 = 1e-6;

/// Inputs shared by every pricing call. `time_years` must be positive;
/// callers floor it upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BsParams {
    pub spot: f64,
    pub strike: f64,
    /// Continuously compounded risk-free rate, decimal fraction.
    pub rate: f64,
    pub time_years: f64,
    pub side: OptionSide,
}

/// Solver failures surfaced by the pricing backend.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    #[error("implied volatility solve did not converge after {iterations} iterations")]
    Diverged { iterations: u32 },
    #[error("vega vanished during implied volatility solve")]
    VegaVanished,
}

/// Pricing capability injected into the Greeks calculator.
pub trait PricingModel: Send + Sync {
    /// Theoretical option price at the given volatility.
    fn price(&self, params: &BsParams, volatility: f64) -> f64;

    /// Full sensitivity set at the given volatility.
    fn greeks(&self, params: &BsParams, volatility: f64) -> Greeks;

    /// Solve the volatility that reproduces `observed_price`.
    fn implied_volatility(
        &self,
        params: &BsParams,
        observed_price: f64,
    ) -> Result<f64, PricingError>;
}

/// Closed-form Black-Scholes engine with a Newton implied-volatility solve.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes;

impl PricingModel for BlackScholes {
    fn price(&self, params: &BsParams, volatility: f64) -> f64 {
        let (d1, d2) = d1_d2(params, volatility);
        let discount = (-params.rate * params.time_years).exp();

        let price = match params.side {
            OptionSide::CE => {
                params.spot * norm_cdf(d1) - params.strike * discount * norm_cdf(d2)
            }
            OptionSide::PE => {
                params.strike * discount * norm_cdf(-d2) - params.spot * norm_cdf(-d1)
            }
        };

        price.max(0.0)
    }

    fn greeks(&self, params: &BsParams, volatility: f64) -> Greeks {
        let (d1, d2) = d1_d2(params, volatility);
        let t = params.time_years.max(1e-6);
        let v = volatility.max(1e-6);
        let s = params.spot;
        let k = params.strike;
        let r = params.rate;

        let pdf = norm_pdf(d1);
        let sqrt_t = t.sqrt();
        let discount = (-r * t).exp();

        let delta = match params.side {
            OptionSide::CE => norm_cdf(d1),
            OptionSide::PE => norm_cdf(d1) - 1.0,
        };

        let gamma = pdf / (s * v * sqrt_t);

        let theta_annual = match params.side {
            OptionSide::CE => -(s * pdf * v) / (2.0 * sqrt_t) - r * k * discount * norm_cdf(d2),
            OptionSide::PE => -(s * pdf * v) / (2.0 * sqrt_t) + r * k * discount * norm_cdf(-d2),
        };

        let rho = match params.side {
            OptionSide::CE => k * t * discount * norm_cdf(d2) / 100.0,
            OptionSide::PE => -k * t * discount * norm_cdf(-d2) / 100.0,
        };

        Greeks {
            delta,
            gamma,
            theta: theta_annual / 365.0,
            vega: s * pdf * sqrt_t / 100.0,
            rho,
        }
    }

    fn implied_volatility(
        &self,
        params: &BsParams,
        observed_price: f64,
    ) -> Result<f64, PricingError> {
        let mut vol = 0.3;
        let tolerance = IV_TOLERANCE * observed_price.max(1.0);

        for _ in 0..IV_MAX_ITERATIONS {
            let price = self.price(params, vol);
            let diff = price - observed_price;
            if diff.abs() < tolerance {
                return Ok(vol);
            }

            let (d1, _) = d1_d2(params, vol);
            // Raw dPrice/dVol, not the per-point vega reported to callers.
            let vega = params.spot * norm_pdf(d1) * params.time_years.max(1e-6).sqrt();
            if vega.abs() < 1e-10 {
                return Err(PricingError::VegaVanished);
            }

            vol = (vol - diff / vega).clamp(MIN_VOL, MAX_VOL);
        }

        Err(PricingError::Diverged {
            iterations: IV_MAX_ITERATIONS,
        })
    }
}

fn d1_d2(params: &BsParams, volatility: f64) -> (f64, f64) {
    let s = params.spot;
    let k = params.strike;
    let t = params.time_years.max(1e-6);
    let v = volatility.max(1e-6);
    let r = params.rate;

    let d1 = ((s / k).ln() + (r + 0.5 * v * v) * t) / (v * t.sqrt());
    let d2 = d1 - v * t.sqrt();

    (d1, d2)
}

fn norm_pdf(x: f64) -> f64 {
    (1.0 / (2.0 * PI).sqrt()) * (-0.5 * x * x).exp()
}

/// Abramowitz & Stegun 26.2.17 polynomial approximation.
fn norm_cdf(x: f64) -> f64 {
    let k = 1.0 / (1.0 + 0.2316419 * x.abs());
    let poly = k
        * (0.319381530
            + k * (-0.356563782 + k * (1.781477937 + k * (-1.821255978 + k * 1.330274429))));

    let approx = 1.0 - norm_pdf(x) * poly;

    if x >= 0.0 {
        approx
    } else {
        1.0 - approx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm_call() -> BsParams {
        BsParams {
            spot: 24000.0,
            strike: 24000.0,
            rate: 0.0,
            time_years: 30.0 / 365.0,
            side: OptionSide::CE,
        }
    }

    #[test]
    fn norm_cdf_is_symmetric_and_saturates() {
        assert!((norm_cdf(0.5) + norm_cdf(-0.5) - 1.0).abs() < 1e-7);
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((norm_cdf(10.0) - 1.0).abs() < 1e-7);
        assert!(norm_cdf(-10.0).abs() < 1e-7);
    }

    #[test]
    fn put_call_parity_holds() {
        let call_params = atm_call();
        let put_params = BsParams {
            side: OptionSide::PE,
            ..call_params
        };

        let model = BlackScholes;
        let call = model.price(&call_params, 0.15);
        let put = model.price(&put_params, 0.15);

        let lhs = call - put;
        let rhs = call_params.spot
            - call_params.strike * (-call_params.rate * call_params.time_years).exp();
        assert!((lhs - rhs).abs() < 1e-6);
    }

    #[test]
    fn atm_call_delta_is_near_one_half() {
        let greeks = BlackScholes.greeks(&atm_call(), 0.15);
        assert!(greeks.delta > 0.45 && greeks.delta < 0.55);
        assert!(greeks.gamma > 0.0);
        assert!(greeks.vega > 0.0);
        assert!(greeks.theta < 0.0);
    }

    #[test]
    fn put_delta_is_negative() {
        let params = BsParams {
            side: OptionSide::PE,
            ..atm_call()
        };
        let greeks = BlackScholes.greeks(&params, 0.15);
        assert!(greeks.delta < 0.0 && greeks.delta > -1.0);
    }

    #[test]
    fn implied_vol_round_trips_through_price() {
        let params = atm_call();
        let model = BlackScholes;

        let price = model.price(&params, 0.22);
        let solved = model
            .implied_volatility(&params, price)
            .expect("solver should converge");

        assert!((solved - 0.22).abs() < 1e-4);
        assert!((model.price(&params, solved) - price).abs() < 0.01);
    }

    #[test]
    fn round_trip_survives_a_put_far_from_the_money() {
        let params = BsParams {
            spot: 83.2,
            strike: 85.0,
            rate: 0.05,
            time_years: 10.0 / 365.0,
            side: OptionSide::PE,
        };
        let model = BlackScholes;

        let price = model.price(&params, 0.08);
        let solved = model
            .implied_volatility(&params, price)
            .expect("solver should converge");
        assert!((model.price(&params, solved) - price).abs() < 1e-4);
    }

    #[test]
    fn unreachable_price_fails_the_solve() {
        // A call can never be worth more than spot.
        let result = BlackScholes.implied_volatility(&atm_call(), 30000.0);
        assert!(result.is_err());
    }

    #[test]
    fn near_expiry_price_approaches_intrinsic() {
        let params = BsParams {
            spot: 24500.0,
            strike: 24000.0,
            rate: 0.0,
            time_years: 0.01 / 365.0,
            side: OptionSide::CE,
        };
        let price = BlackScholes.price(&params, 0.2);
        assert!((price - 500.0).abs() < 5.0);
    }
}
