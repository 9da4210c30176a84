// ─────────────────────────────────────────────────────────────────────
// Crab Noise Core — Bunch Length Correction
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bunch-length correction factor for crab cavity noise.
//!
//! For a Gaussian longitudinal distribution of rms length `σ_φ` (radians at
//! the cavity frequency) and `x = σ_φ²`:
//!
//! - phase noise:     `C = e^{-x} (I_0(x) + 2 Σ_{k>=1} I_{2k}(x))`
//! - amplitude noise: `C = e^{-x} Σ_{k>=0} I_{2k+1}(x)`
//!
//! The exponential prefactor is folded into every term through the scaled
//! Bessel functions, so no intermediate value overflows. The series stops
//! once a term falls below `rel_tolerance` times the running sum; reaching
//! `max_order` first is reported as a non-fatal convergence warning.

use crabnoise_math::bessel::bessel_ive_orders;
use crabnoise_types::config::SeriesConfig;
use crabnoise_types::error::{ensure_non_negative, CrabNoiseResult};
use crabnoise_types::noise::NoiseType;
use ndarray::{Array, Dimension};
use tracing::{debug, warn};

/// Orders added on top of the Gaussian-decay estimate; covers the small
/// argument regime where terms fall like (x/2)^k / k!.
const ORDER_ESTIMATE_MARGIN: usize = 32;

/// Result of one correction factor evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesOutcome {
    /// Correction factor C.
    pub value: f64,
    /// Number of Bessel terms summed.
    pub terms: usize,
    /// Highest Bessel order included.
    pub highest_order: usize,
    /// False when `max_order` was reached before the tolerance was met.
    pub converged: bool,
}

/// Highest order whose term can still matter at relative tolerance `tol`.
///
/// Scaled terms decay like `exp(-k² / 2x)`, giving `k ≈ sqrt(2x ln(1/tol))`.
pub fn series_order_estimate(x: f64, rel_tolerance: f64) -> usize {
    let log_inv_tol = (1.0 / rel_tolerance).ln().max(1.0);
    let gaussian = (2.0 * x * log_inv_tol).sqrt().ceil();
    if gaussian >= usize::MAX as f64 {
        return usize::MAX;
    }
    (gaussian as usize).saturating_add(ORDER_ESTIMATE_MARGIN)
}

/// Bunch-length correction factor `C(σ_φ)` for the given noise type.
///
/// `sigma_phi` is the rms bunch length in radians at the crab cavity
/// frequency. Negative or non-finite values are rejected.
pub fn correction_factor(
    sigma_phi: f64,
    noise: NoiseType,
    series: &SeriesConfig,
) -> CrabNoiseResult<SeriesOutcome> {
    series.validate()?;
    let x = squared_bunch_length(sigma_phi)?;
    let outcome = evaluate_series(x, noise, series)?;

    if outcome.converged {
        debug!(
            sigma_phi,
            noise = %noise,
            terms = outcome.terms,
            highest_order = outcome.highest_order,
            value = outcome.value,
            "correction factor series converged"
        );
    } else {
        warn!(
            sigma_phi,
            noise = %noise,
            max_order = series.max_order,
            value = outcome.value,
            "ConvergenceWarning: correction factor series reached max_order before tolerance"
        );
    }
    Ok(outcome)
}

/// Elementwise correction factor over an array of bunch lengths.
///
/// Every element is validated before any is evaluated. Elements that hit
/// `max_order` keep their best-effort value and are reported in a single
/// warning.
pub fn correction_factor_array<D: Dimension>(
    sigma_phi: &Array<f64, D>,
    noise: NoiseType,
    series: &SeriesConfig,
) -> CrabNoiseResult<Array<f64, D>> {
    series.validate()?;
    let squared = sigma_phi
        .iter()
        .map(|&s| squared_bunch_length(s))
        .collect::<CrabNoiseResult<Vec<f64>>>()?;

    let mut out = Array::<f64, D>::zeros(sigma_phi.raw_dim());
    let mut unconverged = 0usize;
    for (c, &x) in out.iter_mut().zip(squared.iter()) {
        let outcome = evaluate_series(x, noise, series)?;
        if !outcome.converged {
            unconverged += 1;
        }
        *c = outcome.value;
    }

    if unconverged > 0 {
        warn!(
            noise = %noise,
            unconverged,
            total = out.len(),
            max_order = series.max_order,
            "ConvergenceWarning: correction factor series reached max_order before tolerance"
        );
    }
    Ok(out)
}

/// `σ_φ²`; may be `+inf` for finite σ_φ above ~1.34e154.
fn squared_bunch_length(sigma_phi: f64) -> CrabNoiseResult<f64> {
    ensure_non_negative("sigma_phi", sigma_phi)?;
    Ok(sigma_phi * sigma_phi)
}

fn evaluate_series(
    x: f64,
    noise: NoiseType,
    series: &SeriesConfig,
) -> CrabNoiseResult<SeriesOutcome> {
    if x == 0.0 {
        // Only I_0(0) = 1 survives.
        let value = match noise {
            NoiseType::PhaseNoise => 1.0,
            NoiseType::AmplitudeNoise => 0.0,
        };
        return Ok(SeriesOutcome {
            value,
            terms: 1,
            highest_order: 0,
            converged: true,
        });
    }
    if x.is_infinite() {
        // Every scaled term has vanished; the truncated sum is its limit.
        return Ok(SeriesOutcome {
            value: 0.0,
            terms: 0,
            highest_order: 0,
            converged: false,
        });
    }

    let mut n_top = series_order_estimate(x, series.rel_tolerance).min(series.max_order);
    loop {
        let scaled = bessel_ive_orders(x, n_top)?;
        let outcome = sum_series(&scaled, noise, series.rel_tolerance);
        if outcome.converged || n_top >= series.max_order {
            return Ok(outcome);
        }
        n_top = n_top.saturating_mul(2).min(series.max_order);
    }
}

/// Sum the even (phase) or odd (amplitude) orders of a scaled sequence.
fn sum_series(scaled: &[f64], noise: NoiseType, rel_tolerance: f64) -> SeriesOutcome {
    let (first_order, mut sum, weight, mut terms) = match noise {
        NoiseType::PhaseNoise => (2, scaled[0], 2.0, 1),
        NoiseType::AmplitudeNoise => (1, 0.0, 1.0, 0),
    };

    let mut highest_order = 0;
    let mut converged = false;
    for order in (first_order..scaled.len()).step_by(2) {
        let term = weight * scaled[order];
        sum += term;
        terms += 1;
        highest_order = order;
        if term <= rel_tolerance * sum {
            converged = true;
            break;
        }
    }

    SeriesOutcome {
        value: sum,
        terms,
        highest_order,
        converged,
    }
}
