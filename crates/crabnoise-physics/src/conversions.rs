// ─────────────────────────────────────────────────────────────────────
// Crab Noise Core — Conversions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Unit conversions for noise spectra and bunch length.
//!
//! Noise: single-sideband phase noise L(f) in dBc/Hz and the spectral
//! density S(f) in rad²/Hz, related by the IEEE convention
//! `S(f) = 2·10^(L(f)/10)`. Both are one sided here (positive frequencies
//! only).
//!
//! Bunch length: rms length in meters, radians at a reference RF frequency,
//! or seconds. All are 1σ values (the usual quoted bunch length is 4σ_t).

use std::f64::consts::{LN_10, LOG10_E, PI};

use crabnoise_types::config::MachineConfig;
use crabnoise_types::error::{
    ensure_finite, ensure_non_negative, ensure_positive, CrabNoiseResult,
};

/// SSB phase noise L (dBc/Hz) to spectral density S (rad²/Hz).
pub fn ssb_to_dsb(l_dbc: f64) -> f64 {
    2.0 * 10f64.powf(l_dbc / 10.0)
}

/// Spectral density S (rad²/Hz) to SSB phase noise L (dBc/Hz).
pub fn dsb_to_ssb(s_rad2_hz: f64) -> CrabNoiseResult<f64> {
    ensure_positive("spectral density", s_rad2_hz)?;
    Ok(10.0 * (s_rad2_hz / 2.0).log10())
}

/// Uncertainty of S (rad²/Hz) from an uncertainty `sigma_l_db` (dB) on L.
///
/// First-order propagation of `S = 2·10^(L/10)`: `σ_S = ln(10)·S·σ_L/10`.
pub fn psd_uncertainty_from_dbc(l_dbc: f64, sigma_l_db: f64) -> CrabNoiseResult<f64> {
    ensure_finite("l_dbc", l_dbc)?;
    ensure_non_negative("sigma_l_db", sigma_l_db)?;
    Ok(LN_10 * ssb_to_dsb(l_dbc) * sigma_l_db / 10.0)
}

/// Uncertainty of L (dB) from an uncertainty `sigma_psd` on S (rad²/Hz).
pub fn dbc_uncertainty_from_psd(s_rad2_hz: f64, sigma_psd: f64) -> CrabNoiseResult<f64> {
    ensure_positive("spectral density", s_rad2_hz)?;
    ensure_non_negative("sigma_psd", sigma_psd)?;
    Ok(10.0 * LOG10_E * sigma_psd / s_rad2_hz)
}

/// Bunch length in meters to radians at `f_rf`.
pub fn bunch_length_m_to_rad(sigma_z: f64, clight: f64, f_rf: f64) -> CrabNoiseResult<f64> {
    ensure_finite("sigma_z", sigma_z)?;
    ensure_positive("clight", clight)?;
    ensure_positive("f_rf", f_rf)?;
    Ok(sigma_z * (2.0 * PI * f_rf) / clight)
}

/// Bunch length in radians at `f_rf` to meters.
pub fn bunch_length_rad_to_m(sigma_phi: f64, clight: f64, f_rf: f64) -> CrabNoiseResult<f64> {
    ensure_finite("sigma_phi", sigma_phi)?;
    ensure_positive("clight", clight)?;
    ensure_positive("f_rf", f_rf)?;
    Ok(sigma_phi * clight / (2.0 * PI * f_rf))
}

/// Bunch length in meters to seconds.
pub fn bunch_length_m_to_time(sigma_z: f64, clight: f64) -> CrabNoiseResult<f64> {
    ensure_finite("sigma_z", sigma_z)?;
    ensure_positive("clight", clight)?;
    Ok(sigma_z / clight)
}

/// RMS bunch length `sigma_z` (m) in radians at the machine's crab cavity
/// frequency.
pub fn bunch_length_at_cavity(cfg: &MachineConfig, sigma_z: f64) -> CrabNoiseResult<f64> {
    bunch_length_m_to_rad(sigma_z, cfg.clight, cfg.f_cc)
}

/// Bunch length in seconds to meters.
pub fn bunch_length_time_to_m(sigma_t: f64, clight: f64) -> CrabNoiseResult<f64> {
    ensure_finite("sigma_t", sigma_t)?;
    ensure_positive("clight", clight)?;
    Ok(sigma_t * clight)
}

/// RMS noise kick of a SixTrackLib run to a spectral density (rad²/Hz).
///
/// SixTrackLib normalizes the cavity phase/amplitude kick by `E_b/V`.
pub fn sixtracklib_kick_to_psd(
    kick_rms: f64,
    e_beam: f64,
    v_cc: f64,
    f_rev: f64,
) -> CrabNoiseResult<f64> {
    ensure_finite("kick_rms", kick_rms)?;
    ensure_positive("e_beam", e_beam)?;
    ensure_positive("v_cc", v_cc)?;
    ensure_positive("f_rev", f_rev)?;
    let scale = e_beam / v_cc;
    Ok((kick_rms * scale).powi(2) / f_rev)
}

/// Spectral density (rad²/Hz) to the RMS noise kick applied in SixTrackLib.
pub fn psd_to_sixtracklib_kick(
    psd: f64,
    e_beam: f64,
    v_cc: f64,
    f_rev: f64,
) -> CrabNoiseResult<f64> {
    ensure_non_negative("psd", psd)?;
    ensure_positive("e_beam", e_beam)?;
    ensure_positive("v_cc", v_cc)?;
    ensure_positive("f_rev", f_rev)?;
    let scale = e_beam / v_cc;
    Ok((psd * f_rev).sqrt() / scale)
}
