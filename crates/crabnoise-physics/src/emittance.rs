// ─────────────────────────────────────────────────────────────────────
// Crab Noise Core — Emittance Growth
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Transverse emittance growth from crab cavity phase and amplitude noise.
//!
//! Geometric emittance growth rate (m/s):
//!
//! `dε/dt = β_y (V f_rev / 2E_b)² C S`
//!
//! scaled by 1 (one-sided S) or 2 (two-sided S) for phase noise and by 2 or
//! 4 for amplitude noise. The inverse recovers S from a measured rate with
//! the same scaling.

use crabnoise_types::config::MachineConfig;
use crabnoise_types::error::{ensure_non_negative, ensure_positive, CrabNoiseResult};
use crabnoise_types::noise::{NoiseType, PsdConvention};

use crate::conversions::{
    dbc_uncertainty_from_psd, dsb_to_ssb, psd_uncertainty_from_dbc, ssb_to_dsb,
};
use crate::correction::correction_factor;

/// Machine parameters entering the growth rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthParams {
    /// Vertical beta function at the crab cavity (m).
    pub beta_y: f64,
    /// Crab cavity voltage (V).
    pub v_cc: f64,
    /// Revolution frequency (Hz).
    pub f_rev: f64,
    /// Beam energy (eV).
    pub e_beam: f64,
}

impl GrowthParams {
    pub fn from_machine(cfg: &MachineConfig) -> Self {
        GrowthParams {
            beta_y: cfg.beta_y,
            v_cc: cfg.v_cc,
            f_rev: cfg.f_rev,
            e_beam: cfg.e_beam,
        }
    }

    fn validate(&self) -> CrabNoiseResult<()> {
        ensure_positive("beta_y", self.beta_y)?;
        ensure_positive("v_cc", self.v_cc)?;
        ensure_positive("f_rev", self.f_rev)?;
        ensure_positive("e_beam", self.e_beam)?;
        Ok(())
    }

    /// β_y (V f_rev / 2E_b)²
    fn coupling(&self) -> f64 {
        self.beta_y * (self.v_cc * self.f_rev / (2.0 * self.e_beam)).powi(2)
    }
}

/// Factor applied on top of the base formula for the PSD convention.
///
/// Amplitude noise carries twice the phase noise weight; a two-sided PSD
/// doubles either.
pub fn convention_factor(noise: NoiseType, convention: PsdConvention) -> f64 {
    let base = match noise {
        NoiseType::PhaseNoise => 1.0,
        NoiseType::AmplitudeNoise => 2.0,
    };
    if convention.is_one_sided() {
        base
    } else {
        2.0 * base
    }
}

/// Geometric emittance growth rate (m/s) for a noise PSD in rad²/Hz.
///
/// `correction` is the bunch-length correction factor C.
pub fn emittance_growth_rate(
    noise: NoiseType,
    params: &GrowthParams,
    correction: f64,
    psd: f64,
    convention: PsdConvention,
) -> CrabNoiseResult<f64> {
    params.validate()?;
    ensure_non_negative("correction factor", correction)?;
    ensure_non_negative("psd", psd)?;

    let rate = params.coupling() * correction * psd;
    Ok(rate * convention_factor(noise, convention))
}

/// Noise PSD (rad²/Hz) that produces a given geometric growth rate (m/s).
pub fn noise_psd_from_growth_rate(
    noise: NoiseType,
    params: &GrowthParams,
    correction: f64,
    growth_rate: f64,
    convention: PsdConvention,
) -> CrabNoiseResult<f64> {
    params.validate()?;
    ensure_positive("correction factor", correction)?;
    ensure_non_negative("growth rate", growth_rate)?;

    let psd = growth_rate / (params.coupling() * correction);
    Ok(psd / convention_factor(noise, convention))
}

/// Normalized emittance growth rate: geometric rate times β₀γ₀.
pub fn normalised_emittance_rate(
    geometric_rate: f64,
    cfg: &MachineConfig,
) -> CrabNoiseResult<f64> {
    cfg.validate()?;
    Ok(geometric_rate * cfg.beta_0() * cfg.gamma_0())
}

/// Growth rate expected from a measured noise level in dBc/Hz.
///
/// The correction factor is computed for `sigma_phi` with the machine's
/// series settings.
pub fn growth_rate_from_measurement(
    cfg: &MachineConfig,
    noise: NoiseType,
    sigma_phi: f64,
    l_dbc: f64,
    convention: PsdConvention,
) -> CrabNoiseResult<f64> {
    let correction = correction_factor(sigma_phi, noise, &cfg.series)?.value;
    emittance_growth_rate(
        noise,
        &GrowthParams::from_machine(cfg),
        correction,
        ssb_to_dsb(l_dbc),
        convention,
    )
}

/// Phase noise level equivalent to combined phase and amplitude noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveNoise {
    /// Growth rate from the phase noise measurement (m/s).
    pub rate_phase: f64,
    /// Growth rate from the amplitude noise measurement (m/s).
    pub rate_amplitude: f64,
    /// Sum of both rates; the two sources are independent.
    pub rate_total: f64,
    /// Phase noise PSD producing `rate_total` on its own (rad²/Hz).
    pub psd_rad2_hz: f64,
    /// Same, as SSB level (dBc/Hz).
    pub l_dbc_hz: f64,
}

/// Fold measured phase and amplitude noise into one effective phase noise.
pub fn effective_phase_noise(
    cfg: &MachineConfig,
    sigma_phi: f64,
    pn_dbc: f64,
    an_dbc: f64,
    convention: PsdConvention,
) -> CrabNoiseResult<EffectiveNoise> {
    cfg.validate()?;
    let rate_phase =
        growth_rate_from_measurement(cfg, NoiseType::PhaseNoise, sigma_phi, pn_dbc, convention)?;
    let rate_amplitude = growth_rate_from_measurement(
        cfg,
        NoiseType::AmplitudeNoise,
        sigma_phi,
        an_dbc,
        convention,
    )?;
    let rate_total = rate_phase + rate_amplitude;

    let c_phase = correction_factor(sigma_phi, NoiseType::PhaseNoise, &cfg.series)?.value;
    let psd_rad2_hz = noise_psd_from_growth_rate(
        NoiseType::PhaseNoise,
        &GrowthParams::from_machine(cfg),
        c_phase,
        rate_total,
        convention,
    )?;

    Ok(EffectiveNoise {
        rate_phase,
        rate_amplitude,
        rate_total,
        psd_rad2_hz,
        l_dbc_hz: dsb_to_ssb(psd_rad2_hz)?,
    })
}

/// Derivative of the growth rate with respect to the PSD (m/s per rad²/Hz).
pub fn rate_prefactor(
    noise: NoiseType,
    params: &GrowthParams,
    correction: f64,
    convention: PsdConvention,
) -> CrabNoiseResult<f64> {
    params.validate()?;
    ensure_non_negative("correction factor", correction)?;
    Ok(convention_factor(noise, convention) * params.coupling() * correction)
}

/// One-sigma uncertainties propagated from the measured noise levels to
/// the effective phase noise. Bunch length uncertainty is not included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveNoiseUncertainty {
    /// Phase noise PSD uncertainty (rad²/Hz).
    pub sigma_psd_phase: f64,
    /// Amplitude noise PSD uncertainty (rad²/Hz).
    pub sigma_psd_amplitude: f64,
    /// Uncertainty of the total growth rate (m/s).
    pub sigma_rate_total: f64,
    /// Uncertainty of the effective phase noise PSD (rad²/Hz).
    pub sigma_psd_rad2_hz: f64,
    /// Uncertainty of the effective phase noise level (dB).
    pub sigma_l_dbc_hz: f64,
}

/// Propagate measurement uncertainties through [`effective_phase_noise`].
///
/// The two noise sources are independent, so their rate uncertainties add in
/// quadrature before being mapped back through the phase noise prefactor.
#[allow(clippy::too_many_arguments)]
pub fn effective_phase_noise_uncertainty(
    cfg: &MachineConfig,
    sigma_phi: f64,
    pn_dbc: f64,
    sigma_pn_db: f64,
    an_dbc: f64,
    sigma_an_db: f64,
    convention: PsdConvention,
) -> CrabNoiseResult<EffectiveNoiseUncertainty> {
    let effective = effective_phase_noise(cfg, sigma_phi, pn_dbc, an_dbc, convention)?;
    let sigma_psd_phase = psd_uncertainty_from_dbc(pn_dbc, sigma_pn_db)?;
    let sigma_psd_amplitude = psd_uncertainty_from_dbc(an_dbc, sigma_an_db)?;

    let params = GrowthParams::from_machine(cfg);
    let c_phase = correction_factor(sigma_phi, NoiseType::PhaseNoise, &cfg.series)?.value;
    let c_amplitude = correction_factor(sigma_phi, NoiseType::AmplitudeNoise, &cfg.series)?.value;
    let k_phase = rate_prefactor(NoiseType::PhaseNoise, &params, c_phase, convention)?;
    let k_amplitude = rate_prefactor(NoiseType::AmplitudeNoise, &params, c_amplitude, convention)?;

    let sigma_rate_total = (k_phase * sigma_psd_phase).hypot(k_amplitude * sigma_psd_amplitude);
    ensure_positive("phase noise rate prefactor", k_phase)?;
    let sigma_psd_rad2_hz = sigma_rate_total / k_phase;

    Ok(EffectiveNoiseUncertainty {
        sigma_psd_phase,
        sigma_psd_amplitude,
        sigma_rate_total,
        sigma_psd_rad2_hz,
        sigma_l_dbc_hz: dbc_uncertainty_from_psd(effective.psd_rad2_hz, sigma_psd_rad2_hz)?,
    })
}
