// ─────────────────────────────────────────────────────────────────────
// Crab Noise Core — Noise Selectors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Selectors shared by the correction factor and growth-rate formulas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CrabNoiseError;

/// Which crab cavity perturbation drives the transverse noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseType {
    /// Noise on the RF phase of the cavity.
    #[serde(rename = "PN")]
    PhaseNoise,
    /// Noise on the RF voltage amplitude of the cavity.
    #[serde(rename = "AN")]
    AmplitudeNoise,
}

impl NoiseType {
    /// Short tag used in measurement tables ("PN" / "AN").
    pub fn tag(self) -> &'static str {
        match self {
            NoiseType::PhaseNoise => "PN",
            NoiseType::AmplitudeNoise => "AN",
        }
    }
}

impl fmt::Display for NoiseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NoiseType {
    type Err = CrabNoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pn" | "phase" | "phase_noise" => Ok(NoiseType::PhaseNoise),
            "an" | "amplitude" | "amplitude_noise" => Ok(NoiseType::AmplitudeNoise),
            other => Err(CrabNoiseError::InvalidArgument(format!(
                "unrecognized noise type '{other}', expected PN or AN"
            ))),
        }
    }
}

/// Whether a power spectral density covers positive frequencies only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PsdConvention {
    OneSided,
    TwoSided,
}

impl PsdConvention {
    pub fn from_one_sided(one_sided: bool) -> Self {
        if one_sided {
            PsdConvention::OneSided
        } else {
            PsdConvention::TwoSided
        }
    }

    pub fn is_one_sided(self) -> bool {
        matches!(self, PsdConvention::OneSided)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_type_parses_tags() {
        assert_eq!("PN".parse::<NoiseType>().unwrap(), NoiseType::PhaseNoise);
        assert_eq!("an".parse::<NoiseType>().unwrap(), NoiseType::AmplitudeNoise);
        assert_eq!(
            " Amplitude ".parse::<NoiseType>().unwrap(),
            NoiseType::AmplitudeNoise
        );
        assert_eq!("phase".parse::<NoiseType>().unwrap(), NoiseType::PhaseNoise);
    }

    #[test]
    fn test_noise_type_rejects_unknown_tag() {
        let err = "XN".parse::<NoiseType>().unwrap_err();
        assert!(matches!(err, CrabNoiseError::InvalidArgument(_)));
    }

    #[test]
    fn test_noise_type_display_roundtrip() {
        for noise in [NoiseType::PhaseNoise, NoiseType::AmplitudeNoise] {
            assert_eq!(noise.to_string().parse::<NoiseType>().unwrap(), noise);
        }
    }

    #[test]
    fn test_noise_type_serde_uses_tags() {
        let json = serde_json::to_string(&NoiseType::AmplitudeNoise).unwrap();
        assert_eq!(json, "\"AN\"");
        let back: NoiseType = serde_json::from_str("\"PN\"").unwrap();
        assert_eq!(back, NoiseType::PhaseNoise);
    }

    #[test]
    fn test_psd_convention_from_flag() {
        assert_eq!(PsdConvention::from_one_sided(true), PsdConvention::OneSided);
        assert_eq!(PsdConvention::from_one_sided(false), PsdConvention::TwoSided);
        assert!(PsdConvention::OneSided.is_one_sided());
        assert!(!PsdConvention::TwoSided.is_one_sided());
    }
}
