// ─────────────────────────────────────────────────────────────────────
// Crab Noise Core — Property-Based Tests (proptest) for crabnoise-physics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for crabnoise-physics using proptest.
//!
//! Covers: correction factor bounds and closed forms, the PN/AN sum rule,
//! monotonic decay, growth-rate inversion, unit conversion inverses.

use crabnoise_physics::conversions::{
    bunch_length_m_to_rad, bunch_length_rad_to_m, dsb_to_ssb, ssb_to_dsb,
};
use crabnoise_physics::correction::{correction_factor, correction_factor_array};
use crabnoise_physics::emittance::{
    emittance_growth_rate, noise_psd_from_growth_rate, GrowthParams,
};
use crabnoise_types::config::SeriesConfig;
use crabnoise_types::constants::CLIGHT;
use crabnoise_types::noise::{NoiseType, PsdConvention};
use ndarray::Array1;
use proptest::prelude::*;

fn c(sigma: f64, noise: NoiseType) -> f64 {
    correction_factor(sigma, noise, &SeriesConfig::default())
        .unwrap()
        .value
}

fn noise_strategy() -> impl Strategy<Value = NoiseType> {
    prop_oneof![Just(NoiseType::PhaseNoise), Just(NoiseType::AmplitudeNoise)]
}

fn convention_strategy() -> impl Strategy<Value = PsdConvention> {
    prop_oneof![Just(PsdConvention::OneSided), Just(PsdConvention::TwoSided)]
}

// ── Correction Factor Properties ─────────────────────────────────────

proptest! {
    /// 0.5 <= C_PN <= 1 and 0 <= C_AN <= 0.25.
    #[test]
    fn correction_bounded(sigma in 0.0f64..40.0) {
        let pn = c(sigma, NoiseType::PhaseNoise);
        let an = c(sigma, NoiseType::AmplitudeNoise);
        prop_assert!((0.5 - 1e-13..=1.0 + 1e-13).contains(&pn), "C_PN({}) = {}", sigma, pn);
        prop_assert!((-1e-13..=0.25 + 1e-13).contains(&an), "C_AN({}) = {}", sigma, an);
    }

    /// Series agrees with (1 + e^{-2x})/2 and (1 - e^{-2x})/4.
    #[test]
    fn correction_matches_closed_form(sigma in 0.0f64..30.0) {
        let x = sigma * sigma;
        let pn = c(sigma, NoiseType::PhaseNoise);
        let an = c(sigma, NoiseType::AmplitudeNoise);
        prop_assert!((pn - 0.5 * (1.0 + (-2.0 * x).exp())).abs() < 1e-13);
        prop_assert!((an + 0.25 * (-2.0 * x).exp_m1()).abs() < 1e-13);
    }

    /// C_PN + 2 C_AN = 1: even and odd scaled orders together sum to one.
    #[test]
    fn phase_amplitude_sum_rule(sigma in 0.0f64..30.0) {
        let total = c(sigma, NoiseType::PhaseNoise) + 2.0 * c(sigma, NoiseType::AmplitudeNoise);
        prop_assert!((total - 1.0).abs() < 1e-13, "sigma = {}: {}", sigma, total);
    }

    /// C_PN decays and C_AN grows with bunch length.
    #[test]
    fn correction_monotonic(a in 0.0f64..8.0, b in 0.0f64..8.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(c(hi, NoiseType::PhaseNoise) <= c(lo, NoiseType::PhaseNoise) + 1e-12);
        prop_assert!(c(hi, NoiseType::AmplitudeNoise) + 1e-12 >= c(lo, NoiseType::AmplitudeNoise));
    }

    /// Array evaluation equals the scalar path element by element.
    #[test]
    fn array_matches_scalar(
        sigmas in prop::collection::vec(0.0f64..20.0, 1..16),
        noise in noise_strategy(),
    ) {
        let arr = Array1::from_vec(sigmas.clone());
        let out = correction_factor_array(&arr, noise, &SeriesConfig::default()).unwrap();
        for (s, v) in sigmas.iter().zip(out.iter()) {
            prop_assert_eq!(*v, c(*s, noise));
        }
    }

    /// Negative bunch lengths are always rejected.
    #[test]
    fn negative_sigma_rejected(sigma in -1e3f64..-1e-12, noise in noise_strategy()) {
        prop_assert!(correction_factor(sigma, noise, &SeriesConfig::default()).is_err());
    }
}

// ── Growth Rate and Conversion Properties ────────────────────────────

proptest! {
    /// The inverse recovers the PSD for every noise type and convention.
    #[test]
    fn growth_rate_inverse(
        l_dbc in -160.0f64..-60.0,
        correction in 0.01f64..1.0,
        noise in noise_strategy(),
        conv in convention_strategy(),
    ) {
        let params = GrowthParams { beta_y: 73.0, v_cc: 1e6, f_rev: 43.45e3, e_beam: 270e9 };
        let psd = ssb_to_dsb(l_dbc);
        let rate = emittance_growth_rate(noise, &params, correction, psd, conv).unwrap();
        let back = noise_psd_from_growth_rate(noise, &params, correction, rate, conv).unwrap();
        prop_assert!((back - psd).abs() <= 1e-12 * psd);
    }

    /// Growth rate is linear in the PSD.
    #[test]
    fn growth_rate_linear_in_psd(psd in 1e-16f64..1e-6, scale in 0.1f64..10.0) {
        let params = GrowthParams { beta_y: 73.0, v_cc: 1e6, f_rev: 43.45e3, e_beam: 270e9 };
        let r1 = emittance_growth_rate(NoiseType::PhaseNoise, &params, 0.5, psd, PsdConvention::OneSided).unwrap();
        let r2 = emittance_growth_rate(NoiseType::PhaseNoise, &params, 0.5, scale * psd, PsdConvention::OneSided).unwrap();
        prop_assert!((r2 - scale * r1).abs() <= 1e-12 * r2.abs());
    }

    /// dsb_to_ssb inverts ssb_to_dsb.
    #[test]
    fn ssb_dsb_inverse(l_dbc in -200.0f64..50.0) {
        let back = dsb_to_ssb(ssb_to_dsb(l_dbc)).unwrap();
        prop_assert!((back - l_dbc).abs() < 1e-9);
    }

    /// Meters to radians and back.
    #[test]
    fn bunch_length_inverse(sigma_z in 0.0f64..2.0, f_rf in 1e6f64..1e10) {
        let rad = bunch_length_m_to_rad(sigma_z, CLIGHT, f_rf).unwrap();
        let back = bunch_length_rad_to_m(rad, CLIGHT, f_rf).unwrap();
        prop_assert!((back - sigma_z).abs() <= 1e-14 * sigma_z.max(1e-300));
    }
}
