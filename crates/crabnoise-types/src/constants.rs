// ─────────────────────────────────────────────────────────────────────
// Crab Noise Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Speed of light in vacuum (m/s).
pub const CLIGHT: f64 = 299_792_458.0;

/// Proton rest energy (eV).
pub const PROTON_MASS_EV: f64 = 938.272_088_16e6;

/// SPS revolution frequency (Hz).
pub const SPS_F_REV: f64 = 43.45e3;

/// SPS crab cavity frequency (Hz).
pub const SPS_F_CC: f64 = 400.789e6;

/// SPS beam energy during the crab cavity tests (eV).
pub const SPS_E_BEAM: f64 = 270e9;

/// Vertical beta function used for the emittance growth estimates (m).
/// ~76 m at CC1.
pub const SPS_BETA_Y: f64 = 73.0;

/// Vertical beta function at the crab cavity from the Q26 optics (m).
pub const SPS_BETA_Y_CC: f64 = 73.82;

/// Crab cavity voltage used in the SPS noise studies (V).
pub const SPS_V_CC: f64 = 1e6;

/// Vertical tune of the SPS Q26 optics.
pub const SPS_Q_Y: f64 = 26.18;
