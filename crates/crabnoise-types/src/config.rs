// ─────────────────────────────────────────────────────────────────────
// Crab Noise Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::{
    CLIGHT, PROTON_MASS_EV, SPS_BETA_Y, SPS_BETA_Y_CC, SPS_E_BEAM, SPS_F_CC, SPS_F_REV, SPS_Q_Y,
    SPS_V_CC,
};
use crate::error::{CrabNoiseError, CrabNoiseResult};

/// Machine and beam parameters for crab cavity noise estimates.
/// Every computation takes these explicitly; nothing is read from globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    pub machine_name: String,
    /// Vertical beta function at the observation point (m).
    pub beta_y: f64,
    /// Vertical beta function at the crab cavity (m).
    pub beta_y_cc: f64,
    /// Crab cavity voltage (V).
    pub v_cc: f64,
    /// Revolution frequency (Hz).
    pub f_rev: f64,
    /// Total beam energy (eV).
    pub e_beam: f64,
    /// Crab cavity RF frequency (Hz).
    pub f_cc: f64,
    /// Vertical tune.
    pub q_y: f64,
    /// Phase advance between cavity and observation point (units of 2π).
    #[serde(default)]
    pub mu_y: f64,
    #[serde(default = "default_clight")]
    pub clight: f64,
    /// Rest energy of the beam particle (eV).
    #[serde(default = "default_rest_mass")]
    pub rest_mass_ev: f64,
    #[serde(default)]
    pub series: SeriesConfig,
}

/// Truncation controls for the Bessel series of the correction factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Stop once a term drops below `rel_tolerance` times the running sum.
    #[serde(default = "default_rel_tolerance")]
    pub rel_tolerance: f64,
    /// Largest Bessel order the series may reach.
    #[serde(default = "default_max_order")]
    pub max_order: usize,
}

fn default_clight() -> f64 {
    CLIGHT
}
fn default_rest_mass() -> f64 {
    PROTON_MASS_EV
}
fn default_rel_tolerance() -> f64 {
    1e-15
}
fn default_max_order() -> usize {
    10_000
}

impl Default for SeriesConfig {
    fn default() -> Self {
        SeriesConfig {
            rel_tolerance: default_rel_tolerance(),
            max_order: default_max_order(),
        }
    }
}

impl SeriesConfig {
    pub fn validate(&self) -> CrabNoiseResult<()> {
        if !self.rel_tolerance.is_finite() || self.rel_tolerance <= 0.0 || self.rel_tolerance >= 1.0
        {
            return Err(CrabNoiseError::InvalidArgument(format!(
                "series rel_tolerance must be in (0, 1), got {}",
                self.rel_tolerance
            )));
        }
        if self.max_order < 2 {
            return Err(CrabNoiseError::InvalidArgument(format!(
                "series max_order must be >= 2, got {}",
                self.max_order
            )));
        }
        Ok(())
    }
}

impl MachineConfig {
    /// SPS crab cavity test parameters (270 GeV protons, Q26 optics).
    pub fn sps_default() -> Self {
        MachineConfig {
            machine_name: "SPS-CC-2018".to_string(),
            beta_y: SPS_BETA_Y,
            beta_y_cc: SPS_BETA_Y_CC,
            v_cc: SPS_V_CC,
            f_rev: SPS_F_REV,
            e_beam: SPS_E_BEAM,
            f_cc: SPS_F_CC,
            q_y: SPS_Q_Y,
            mu_y: 0.0,
            clight: CLIGHT,
            rest_mass_ev: PROTON_MASS_EV,
            series: SeriesConfig::default(),
        }
    }

    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> CrabNoiseResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> CrabNoiseResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CrabNoiseResult<()> {
        let positive = [
            ("beta_y", self.beta_y),
            ("beta_y_cc", self.beta_y_cc),
            ("v_cc", self.v_cc),
            ("f_rev", self.f_rev),
            ("e_beam", self.e_beam),
            ("f_cc", self.f_cc),
            ("clight", self.clight),
            ("rest_mass_ev", self.rest_mass_ev),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CrabNoiseError::ConfigError(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if !self.q_y.is_finite() || !self.mu_y.is_finite() {
            return Err(CrabNoiseError::ConfigError(format!(
                "q_y and mu_y must be finite, got q_y={} mu_y={}",
                self.q_y, self.mu_y
            )));
        }
        if self.e_beam < self.rest_mass_ev {
            return Err(CrabNoiseError::ConfigError(format!(
                "e_beam ({}) is below the rest energy ({})",
                self.e_beam, self.rest_mass_ev
            )));
        }
        self.series
            .validate()
            .map_err(|e| CrabNoiseError::ConfigError(e.to_string()))
    }

    /// Relativistic gamma of the beam.
    pub fn gamma_0(&self) -> f64 {
        self.e_beam / self.rest_mass_ev
    }

    /// Relativistic beta of the beam.
    pub fn beta_0(&self) -> f64 {
        let gamma = self.gamma_0();
        (1.0 - 1.0 / (gamma * gamma)).sqrt()
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::sps_default()
    }
}
