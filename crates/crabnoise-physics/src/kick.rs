// ─────────────────────────────────────────────────────────────────────
// Crab Noise Core — Crab Cavity Kicks
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Crab cavity transverse kicks and the closed-orbit distortion they drive.

use std::f64::consts::PI;

use crabnoise_types::config::MachineConfig;
use crabnoise_types::error::{ensure_finite, ensure_positive, CrabNoiseError, CrabNoiseResult};
use ndarray::Array1;

/// Tunes closer than this to an integer are treated as on resonance.
const INTEGER_TUNE_TOL: f64 = 1e-9;

/// RF wavenumber k = 2π f / c (1/m).
pub fn rf_wavenumber(f_cc: f64, clight: f64) -> CrabNoiseResult<f64> {
    ensure_positive("f_cc", f_cc)?;
    ensure_positive("clight", clight)?;
    Ok(2.0 * PI * f_cc / clight)
}

/// Vertical momentum kick Δp_y = V sin(φ + k z) / E_0 at each longitudinal
/// position `z` (m).
pub fn cc_momentum_kick(
    v_cc: f64,
    phase: f64,
    k: f64,
    z: &Array1<f64>,
    e_0: f64,
) -> CrabNoiseResult<Array1<f64>> {
    ensure_finite("v_cc", v_cc)?;
    ensure_finite("phase", phase)?;
    ensure_finite("k", k)?;
    ensure_positive("e_0", e_0)?;
    Ok(z.mapv(|zi| v_cc * (phase + k * zi).sin() / e_0))
}

/// [`cc_momentum_kick`] with the voltage, RF wavenumber and beam energy of
/// `cfg`.
pub fn cc_momentum_kick_for(
    cfg: &MachineConfig,
    phase: f64,
    z: &Array1<f64>,
) -> CrabNoiseResult<Array1<f64>> {
    let k = rf_wavenumber(cfg.f_cc, cfg.clight)?;
    cc_momentum_kick(cfg.v_cc, phase, k, z, cfg.e_beam)
}

/// Kick from a cavity phase error Δφ (normalized by V/E): Δφ cos(k z).
///
/// Maximal at the bunch center.
pub fn phase_noise_momentum_kick(
    delta_phi: f64,
    f_cc: f64,
    clight: f64,
    z: &Array1<f64>,
) -> CrabNoiseResult<Array1<f64>> {
    ensure_finite("delta_phi", delta_phi)?;
    let k = rf_wavenumber(f_cc, clight)?;
    Ok(z.mapv(|zi| delta_phi * (k * zi).cos()))
}

/// Kick from a relative cavity amplitude error ΔA (normalized by V/E):
/// ΔA sin(k z).
///
/// Vanishes at the bunch center.
pub fn amplitude_noise_momentum_kick(
    delta_a: f64,
    f_cc: f64,
    clight: f64,
    z: &Array1<f64>,
) -> CrabNoiseResult<Array1<f64>> {
    ensure_finite("delta_a", delta_a)?;
    let k = rf_wavenumber(f_cc, clight)?;
    Ok(z.mapv(|zi| delta_a * (k * zi).sin()))
}

fn closed_orbit_response(beta_y: f64, beta_y_cc: f64, mu_y: f64, q_y: f64) -> CrabNoiseResult<f64> {
    ensure_positive("beta_y", beta_y)?;
    ensure_positive("beta_y_cc", beta_y_cc)?;
    ensure_finite("mu_y", mu_y)?;
    ensure_finite("q_y", q_y)?;
    if (q_y - q_y.round()).abs() < INTEGER_TUNE_TOL {
        return Err(CrabNoiseError::InvalidArgument(format!(
            "closed orbit is singular at integer tune q_y = {q_y}"
        )));
    }
    Ok((beta_y * beta_y_cc).sqrt() * (2.0 * PI * mu_y - PI * q_y).cos() / (2.0 * (PI * q_y).sin()))
}

/// Closed-orbit displacement (m) from a single dipole kick `delta_py` (rad)
/// at the crab cavity.
///
/// `mu_y` is the phase advance from the cavity in units of 2π. Integer
/// tunes are rejected.
pub fn closed_orbit_kick(
    beta_y: f64,
    beta_y_cc: f64,
    delta_py: f64,
    mu_y: f64,
    q_y: f64,
) -> CrabNoiseResult<f64> {
    ensure_finite("delta_py", delta_py)?;
    Ok(closed_orbit_response(beta_y, beta_y_cc, mu_y, q_y)? * delta_py)
}

/// [`closed_orbit_kick`] with the optics and tune of `cfg`.
pub fn closed_orbit_kick_for(cfg: &MachineConfig, delta_py: f64) -> CrabNoiseResult<f64> {
    closed_orbit_kick(cfg.beta_y, cfg.beta_y_cc, delta_py, cfg.mu_y, cfg.q_y)
}

/// Closed-orbit displacement for every slice kick in `delta_py`.
pub fn closed_orbit_kick_array(
    beta_y: f64,
    beta_y_cc: f64,
    delta_py: &Array1<f64>,
    mu_y: f64,
    q_y: f64,
) -> CrabNoiseResult<Array1<f64>> {
    if let Some(bad) = delta_py.iter().find(|v| !v.is_finite()) {
        return Err(CrabNoiseError::InvalidArgument(format!(
            "delta_py must be finite, got {bad}"
        )));
    }
    let response = closed_orbit_response(beta_y, beta_y_cc, mu_y, q_y)?;
    Ok(delta_py.mapv(|d| response * d))
}
