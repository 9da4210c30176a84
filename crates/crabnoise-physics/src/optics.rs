// ─────────────────────────────────────────────────────────────────────
// Crab Noise Core — Linear Optics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Normalized phase space, single-particle actions and tune spread.

use crabnoise_types::error::{ensure_finite, ensure_positive, CrabNoiseError, CrabNoiseResult};
use ndarray::Array1;

/// Normalized coordinates `(u/√β, αu/√β + √β u')` from Twiss β, α.
pub fn normalised_coordinates(
    u: f64,
    u_prime: f64,
    beta: f64,
    alpha: f64,
) -> CrabNoiseResult<(f64, f64)> {
    ensure_positive("beta", beta)?;
    ensure_finite("alpha", alpha)?;
    let sqrt_beta = beta.sqrt();
    let u_n = u / sqrt_beta;
    Ok((u_n, alpha * u_n + sqrt_beta * u_prime))
}

/// Single-particle action J = (u_n² + u'_n²) / 2 in normalized coordinates.
pub fn action(u_n: f64, u_prime_n: f64) -> f64 {
    0.5 * (u_n * u_n + u_prime_n * u_prime_n)
}

/// Actions of a particle distribution given in physical coordinates.
pub fn actions(
    u: &Array1<f64>,
    u_prime: &Array1<f64>,
    beta: f64,
    alpha: f64,
) -> CrabNoiseResult<Array1<f64>> {
    if u.len() != u_prime.len() {
        return Err(CrabNoiseError::InvalidArgument(format!(
            "coordinate length mismatch: {} positions, {} angles",
            u.len(),
            u_prime.len()
        )));
    }
    ensure_positive("beta", beta)?;
    ensure_finite("alpha", alpha)?;
    let sqrt_beta = beta.sqrt();
    Ok(ndarray::Zip::from(u)
        .and(u_prime)
        .map_collect(|&x, &xp| {
            let x_n = x / sqrt_beta;
            action(x_n, alpha * x_n + sqrt_beta * xp)
        }))
}

/// Tune spread from chromaticity `q_prime` for rms momentum spread `dpp_rms`.
///
/// Order 1 gives Q'δ, order 2 gives Q'δ² (second-order chromaticity).
pub fn chromatic_tune_spread(dpp_rms: f64, order: u32, q_prime: f64) -> CrabNoiseResult<f64> {
    ensure_finite("dpp_rms", dpp_rms)?;
    ensure_finite("q_prime", q_prime)?;
    match order {
        1 => Ok(q_prime * dpp_rms),
        2 => Ok(q_prime * dpp_rms * dpp_rms),
        other => Err(CrabNoiseError::InvalidArgument(format!(
            "chromaticity order must be 1 or 2, got {other}"
        ))),
    }
}

/// Horizontal tune shift with amplitude: 2a_xx J_x + 2a_xy J_y.
pub fn amplitude_detuning_x(j_x: f64, j_y: f64, a_xx: f64, a_xy: f64) -> f64 {
    2.0 * a_xx * j_x + 2.0 * a_xy * j_y
}

/// Vertical tune shift with amplitude: 2a_yy J_y + 2a_xy J_x.
pub fn amplitude_detuning_y(j_x: f64, j_y: f64, a_yy: f64, a_xy: f64) -> f64 {
    2.0 * a_yy * j_y + 2.0 * a_xy * j_x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalised_coordinates_unit_beta() {
        let (u_n, up_n) = normalised_coordinates(1e-3, 2e-4, 1.0, 0.0).unwrap();
        assert_eq!(u_n, 1e-3);
        assert_eq!(up_n, 2e-4);
    }

    #[test]
    fn test_normalised_coordinates_with_alpha() {
        let (u_n, up_n) = normalised_coordinates(4e-3, 1e-4, 4.0, -0.5).unwrap();
        assert!((u_n - 2e-3).abs() < 1e-18);
        assert!((up_n - (-1e-3 + 2e-4)).abs() < 1e-18);
    }

    #[test]
    fn test_action_invariant_on_ellipse() {
        // Points on the same Courant-Snyder ellipse share one action.
        let (beta, alpha) = (73.0_f64, 0.0);
        let j = 1e-9;
        let mut seen = Vec::new();
        for k in 0..8 {
            let phi = k as f64 * std::f64::consts::PI / 4.0;
            let u = (2.0 * j * beta).sqrt() * phi.cos();
            let up = -(2.0 * j / beta).sqrt() * phi.sin();
            let (u_n, up_n) = normalised_coordinates(u, up, beta, alpha).unwrap();
            seen.push(action(u_n, up_n));
        }
        assert!(seen.iter().all(|&a| (a - j).abs() < 1e-22), "{seen:?}");
    }

    #[test]
    fn test_actions_array_matches_scalar() {
        let u = Array1::from_vec(vec![1e-3, -2e-3, 0.0]);
        let up = Array1::from_vec(vec![0.0, 1e-5, -3e-5]);
        let js = actions(&u, &up, 30.0, 1.2).unwrap();
        for i in 0..3 {
            let (u_n, up_n) = normalised_coordinates(u[i], up[i], 30.0, 1.2).unwrap();
            assert!((js[i] - action(u_n, up_n)).abs() < 1e-24);
        }
        let short = Array1::from_vec(vec![0.0]);
        assert!(actions(&u, &short, 30.0, 1.2).is_err());
    }

    #[test]
    fn test_chromatic_tune_spread_orders() {
        assert!((chromatic_tune_spread(1e-3, 1, 2.0).unwrap() - 2e-3).abs() < 1e-18);
        assert!((chromatic_tune_spread(1e-3, 2, 2.0).unwrap() - 2e-6).abs() < 1e-21);
        let err = chromatic_tune_spread(1e-3, 3, 2.0).unwrap_err();
        assert!(matches!(err, CrabNoiseError::InvalidArgument(_)));
        assert!(chromatic_tune_spread(1e-3, 0, 2.0).is_err());
    }

    #[test]
    fn test_amplitude_detuning() {
        assert_eq!(amplitude_detuning_x(1.0, 2.0, 3.0, 4.0), 2.0 * 3.0 + 2.0 * 4.0 * 2.0);
        assert_eq!(amplitude_detuning_y(1.0, 2.0, 3.0, 4.0), 2.0 * 3.0 * 2.0 + 2.0 * 4.0);
        assert_eq!(amplitude_detuning_x(0.0, 0.0, 1e4, -5e3), 0.0);
    }

    #[test]
    fn test_rejects_non_positive_beta() {
        assert!(normalised_coordinates(1e-3, 0.0, 0.0, 0.0).is_err());
        assert!(normalised_coordinates(1e-3, 0.0, 73.0, f64::NAN).is_err());
    }
}
