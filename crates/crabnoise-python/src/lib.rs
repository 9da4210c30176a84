// ─────────────────────────────────────────────────────────────────────
// Crab Noise Core — Python Bindings
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! PyO3 Python bindings for Crab Noise Core.
//!
//! Exposes the bunch-length correction factor, emittance growth rates,
//! noise conversions and the closed-orbit kick to Python via PyO3 + numpy.
//! Invalid inputs raise `ValueError`.

use numpy::{IntoPyArray, PyArray1, PyArrayDyn, PyReadonlyArray1, PyReadonlyArrayDyn};
use pyo3::prelude::*;

use crabnoise_physics::{conversions, correction, emittance, kick};
use crabnoise_types::config::{MachineConfig, SeriesConfig};
use crabnoise_types::error::CrabNoiseError;
use crabnoise_types::noise::{NoiseType, PsdConvention};

fn to_py_err(err: CrabNoiseError) -> PyErr {
    match err {
        CrabNoiseError::Io(e) => pyo3::exceptions::PyIOError::new_err(e.to_string()),
        other => pyo3::exceptions::PyValueError::new_err(other.to_string()),
    }
}

fn parse_noise(noise: &str) -> PyResult<NoiseType> {
    noise.parse::<NoiseType>().map_err(to_py_err)
}

fn growth_params(beta_y: f64, v_cc: f64, f_rev: f64, e_beam: f64) -> emittance::GrowthParams {
    emittance::GrowthParams {
        beta_y,
        v_cc,
        f_rev,
        e_beam,
    }
}

// ─── Machine configuration ───

/// Machine parameters loaded from JSON or the SPS defaults.
#[pyclass]
#[derive(Clone)]
struct PyMachineConfig {
    inner: MachineConfig,
}

#[pymethods]
impl PyMachineConfig {
    /// Load and validate a machine configuration from a JSON file.
    #[new]
    fn new(config_path: &str) -> PyResult<Self> {
        let inner = MachineConfig::from_file(config_path).map_err(to_py_err)?;
        Ok(PyMachineConfig { inner })
    }

    /// SPS crab cavity test parameters.
    #[staticmethod]
    fn sps_default() -> Self {
        PyMachineConfig {
            inner: MachineConfig::sps_default(),
        }
    }

    #[getter]
    fn machine_name(&self) -> String {
        self.inner.machine_name.clone()
    }

    #[getter]
    fn beta_y(&self) -> f64 {
        self.inner.beta_y
    }

    #[getter]
    fn v_cc(&self) -> f64 {
        self.inner.v_cc
    }

    #[getter]
    fn f_rev(&self) -> f64 {
        self.inner.f_rev
    }

    #[getter]
    fn e_beam(&self) -> f64 {
        self.inner.e_beam
    }

    #[getter]
    fn f_cc(&self) -> f64 {
        self.inner.f_cc
    }

    #[getter]
    fn clight(&self) -> f64 {
        self.inner.clight
    }

    /// RMS bunch length in meters to radians at this machine's cavity frequency.
    fn bunch_length_at_cavity(&self, sigma_z: f64) -> PyResult<f64> {
        conversions::bunch_length_at_cavity(&self.inner, sigma_z).map_err(to_py_err)
    }

    /// Closed-orbit displacement (m) for a kick at the crab cavity.
    fn closed_orbit_kick(&self, delta_py: f64) -> PyResult<f64> {
        kick::closed_orbit_kick_for(&self.inner, delta_py).map_err(to_py_err)
    }

    /// Crab cavity momentum kick along the bunch for this machine.
    fn cc_momentum_kick<'py>(
        &self,
        py: Python<'py>,
        phase: f64,
        z: PyReadonlyArray1<'py, f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let z = z.as_array().to_owned();
        let dpy = kick::cc_momentum_kick_for(&self.inner, phase, &z).map_err(to_py_err)?;
        Ok(dpy.into_pyarray(py))
    }

    fn __repr__(&self) -> String {
        format!(
            "MachineConfig(name={:?}, beta_y={}, v_cc={:.3e}, f_rev={}, e_beam={:.3e})",
            self.inner.machine_name,
            self.inner.beta_y,
            self.inner.v_cc,
            self.inner.f_rev,
            self.inner.e_beam
        )
    }
}

// ─── Result types ───

/// Correction factor with series diagnostics.
#[pyclass]
#[derive(Clone)]
struct PySeriesOutcome {
    #[pyo3(get)]
    value: f64,
    #[pyo3(get)]
    terms: usize,
    #[pyo3(get)]
    highest_order: usize,
    #[pyo3(get)]
    converged: bool,
}

#[pymethods]
impl PySeriesOutcome {
    fn __repr__(&self) -> String {
        format!(
            "SeriesOutcome(value={:.15}, terms={}, highest_order={}, converged={})",
            self.value, self.terms, self.highest_order, self.converged
        )
    }
}

/// Combined phase and amplitude noise as an equivalent phase noise.
#[pyclass]
#[derive(Clone)]
struct PyEffectiveNoise {
    #[pyo3(get)]
    rate_phase: f64,
    #[pyo3(get)]
    rate_amplitude: f64,
    #[pyo3(get)]
    rate_total: f64,
    #[pyo3(get)]
    psd_rad2_hz: f64,
    #[pyo3(get)]
    l_dbc_hz: f64,
}

#[pymethods]
impl PyEffectiveNoise {
    fn __repr__(&self) -> String {
        format!(
            "EffectiveNoise(rate_total={:.3e} m/s, psd={:.3e} rad^2/Hz, L={:.2} dBc/Hz)",
            self.rate_total, self.psd_rad2_hz, self.l_dbc_hz
        )
    }
}

/// One-sigma uncertainties on the effective phase noise.
#[pyclass]
#[derive(Clone)]
struct PyEffectiveNoiseUncertainty {
    #[pyo3(get)]
    sigma_psd_phase: f64,
    #[pyo3(get)]
    sigma_psd_amplitude: f64,
    #[pyo3(get)]
    sigma_rate_total: f64,
    #[pyo3(get)]
    sigma_psd_rad2_hz: f64,
    #[pyo3(get)]
    sigma_l_dbc_hz: f64,
}

#[pymethods]
impl PyEffectiveNoiseUncertainty {
    fn __repr__(&self) -> String {
        format!(
            "EffectiveNoiseUncertainty(sigma_rate={:.3e} m/s, sigma_psd={:.3e} rad^2/Hz, sigma_L={:.3} dB)",
            self.sigma_rate_total, self.sigma_psd_rad2_hz, self.sigma_l_dbc_hz
        )
    }
}

// ─── Correction factor ───

/// Bunch-length correction factor C(sigma_phi) for "PN" or "AN" noise.
#[pyfunction]
#[pyo3(signature = (sigma_phi, noise = "PN", rel_tolerance = 1e-15, max_order = 10_000))]
fn correction_factor(
    sigma_phi: f64,
    noise: &str,
    rel_tolerance: f64,
    max_order: usize,
) -> PyResult<PySeriesOutcome> {
    let series = SeriesConfig {
        rel_tolerance,
        max_order,
    };
    let outcome =
        correction::correction_factor(sigma_phi, parse_noise(noise)?, &series).map_err(to_py_err)?;
    Ok(PySeriesOutcome {
        value: outcome.value,
        terms: outcome.terms,
        highest_order: outcome.highest_order,
        converged: outcome.converged,
    })
}

/// Elementwise correction factor over a numpy array of any shape.
#[pyfunction]
#[pyo3(signature = (sigma_phi, noise = "PN", rel_tolerance = 1e-15, max_order = 10_000))]
fn correction_factor_array<'py>(
    py: Python<'py>,
    sigma_phi: PyReadonlyArrayDyn<'py, f64>,
    noise: &str,
    rel_tolerance: f64,
    max_order: usize,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let series = SeriesConfig {
        rel_tolerance,
        max_order,
    };
    let sigmas = sigma_phi.as_array().to_owned();
    let out = correction::correction_factor_array(&sigmas, parse_noise(noise)?, &series)
        .map_err(to_py_err)?;
    Ok(out.into_pyarray(py))
}

// ─── Emittance growth ───

/// Geometric emittance growth rate (m/s) for a PSD in rad^2/Hz.
#[pyfunction]
#[pyo3(signature = (noise, beta_y, v_cc, f_rev, e_beam, correction, psd, one_sided = true))]
#[allow(clippy::too_many_arguments)]
fn emittance_growth_rate(
    noise: &str,
    beta_y: f64,
    v_cc: f64,
    f_rev: f64,
    e_beam: f64,
    correction: f64,
    psd: f64,
    one_sided: bool,
) -> PyResult<f64> {
    emittance::emittance_growth_rate(
        parse_noise(noise)?,
        &growth_params(beta_y, v_cc, f_rev, e_beam),
        correction,
        psd,
        PsdConvention::from_one_sided(one_sided),
    )
    .map_err(to_py_err)
}

/// Noise PSD (rad^2/Hz) producing a given geometric growth rate (m/s).
#[pyfunction]
#[pyo3(signature = (noise, beta_y, v_cc, f_rev, e_beam, correction, growth_rate, one_sided = true))]
#[allow(clippy::too_many_arguments)]
fn noise_psd_from_growth_rate(
    noise: &str,
    beta_y: f64,
    v_cc: f64,
    f_rev: f64,
    e_beam: f64,
    correction: f64,
    growth_rate: f64,
    one_sided: bool,
) -> PyResult<f64> {
    emittance::noise_psd_from_growth_rate(
        parse_noise(noise)?,
        &growth_params(beta_y, v_cc, f_rev, e_beam),
        correction,
        growth_rate,
        PsdConvention::from_one_sided(one_sided),
    )
    .map_err(to_py_err)
}

/// Normalized emittance growth rate for the given machine.
#[pyfunction]
fn normalised_emittance_rate(geometric_rate: f64, config: &PyMachineConfig) -> PyResult<f64> {
    emittance::normalised_emittance_rate(geometric_rate, &config.inner).map_err(to_py_err)
}

/// Equivalent phase noise of measured PN and AN levels (dBc/Hz).
#[pyfunction]
#[pyo3(signature = (config, sigma_phi, pn_dbc, an_dbc, one_sided = true))]
fn effective_phase_noise(
    config: &PyMachineConfig,
    sigma_phi: f64,
    pn_dbc: f64,
    an_dbc: f64,
    one_sided: bool,
) -> PyResult<PyEffectiveNoise> {
    let eff = emittance::effective_phase_noise(
        &config.inner,
        sigma_phi,
        pn_dbc,
        an_dbc,
        PsdConvention::from_one_sided(one_sided),
    )
    .map_err(to_py_err)?;
    Ok(PyEffectiveNoise {
        rate_phase: eff.rate_phase,
        rate_amplitude: eff.rate_amplitude,
        rate_total: eff.rate_total,
        psd_rad2_hz: eff.psd_rad2_hz,
        l_dbc_hz: eff.l_dbc_hz,
    })
}

/// Propagate PN/AN measurement uncertainties (dB) to the effective phase noise.
#[pyfunction]
#[pyo3(signature = (config, sigma_phi, pn_dbc, sigma_pn_db, an_dbc, sigma_an_db, one_sided = true))]
#[allow(clippy::too_many_arguments)]
fn effective_phase_noise_uncertainty(
    config: &PyMachineConfig,
    sigma_phi: f64,
    pn_dbc: f64,
    sigma_pn_db: f64,
    an_dbc: f64,
    sigma_an_db: f64,
    one_sided: bool,
) -> PyResult<PyEffectiveNoiseUncertainty> {
    let unc = emittance::effective_phase_noise_uncertainty(
        &config.inner,
        sigma_phi,
        pn_dbc,
        sigma_pn_db,
        an_dbc,
        sigma_an_db,
        PsdConvention::from_one_sided(one_sided),
    )
    .map_err(to_py_err)?;
    Ok(PyEffectiveNoiseUncertainty {
        sigma_psd_phase: unc.sigma_psd_phase,
        sigma_psd_amplitude: unc.sigma_psd_amplitude,
        sigma_rate_total: unc.sigma_rate_total,
        sigma_psd_rad2_hz: unc.sigma_psd_rad2_hz,
        sigma_l_dbc_hz: unc.sigma_l_dbc_hz,
    })
}

// ─── Conversions ───

/// SSB phase noise (dBc/Hz) to spectral density (rad^2/Hz).
#[pyfunction]
fn ssb_to_dsb(l_dbc: f64) -> f64 {
    conversions::ssb_to_dsb(l_dbc)
}

/// Spectral density (rad^2/Hz) to SSB phase noise (dBc/Hz).
#[pyfunction]
fn dsb_to_ssb(s_rad2_hz: f64) -> PyResult<f64> {
    conversions::dsb_to_ssb(s_rad2_hz).map_err(to_py_err)
}

/// Uncertainty (rad^2/Hz) of a PSD given in dBc/Hz with uncertainty in dB.
#[pyfunction]
fn psd_uncertainty_from_dbc(l_dbc: f64, sigma_l_db: f64) -> PyResult<f64> {
    conversions::psd_uncertainty_from_dbc(l_dbc, sigma_l_db).map_err(to_py_err)
}

#[pyfunction]
fn bunch_length_m_to_rad(sigma_z: f64, clight: f64, f_rf: f64) -> PyResult<f64> {
    conversions::bunch_length_m_to_rad(sigma_z, clight, f_rf).map_err(to_py_err)
}

#[pyfunction]
fn bunch_length_rad_to_m(sigma_phi: f64, clight: f64, f_rf: f64) -> PyResult<f64> {
    conversions::bunch_length_rad_to_m(sigma_phi, clight, f_rf).map_err(to_py_err)
}

#[pyfunction]
fn bunch_length_m_to_time(sigma_z: f64, clight: f64) -> PyResult<f64> {
    conversions::bunch_length_m_to_time(sigma_z, clight).map_err(to_py_err)
}

#[pyfunction]
fn bunch_length_time_to_m(sigma_t: f64, clight: f64) -> PyResult<f64> {
    conversions::bunch_length_time_to_m(sigma_t, clight).map_err(to_py_err)
}

// ─── Kicks ───

/// Closed-orbit displacement (m) from a dipole kick at the crab cavity.
#[pyfunction]
fn closed_orbit_kick(
    beta_y: f64,
    beta_y_cc: f64,
    delta_py: f64,
    mu_y: f64,
    q_y: f64,
) -> PyResult<f64> {
    kick::closed_orbit_kick(beta_y, beta_y_cc, delta_py, mu_y, q_y).map_err(to_py_err)
}

/// Crab cavity momentum kick V sin(phase + k z) / E_0 along the bunch.
#[pyfunction]
fn cc_momentum_kick<'py>(
    py: Python<'py>,
    v_cc: f64,
    phase: f64,
    k: f64,
    z: PyReadonlyArray1<'py, f64>,
    e_0: f64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let z = z.as_array().to_owned();
    let dpy = kick::cc_momentum_kick(v_cc, phase, k, &z, e_0).map_err(to_py_err)?;
    Ok(dpy.into_pyarray(py))
}

#[pymodule]
fn crabnoise_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMachineConfig>()?;
    m.add_class::<PySeriesOutcome>()?;
    m.add_class::<PyEffectiveNoise>()?;
    m.add_class::<PyEffectiveNoiseUncertainty>()?;
    m.add_function(wrap_pyfunction!(correction_factor, m)?)?;
    m.add_function(wrap_pyfunction!(correction_factor_array, m)?)?;
    m.add_function(wrap_pyfunction!(emittance_growth_rate, m)?)?;
    m.add_function(wrap_pyfunction!(noise_psd_from_growth_rate, m)?)?;
    m.add_function(wrap_pyfunction!(normalised_emittance_rate, m)?)?;
    m.add_function(wrap_pyfunction!(effective_phase_noise, m)?)?;
    m.add_function(wrap_pyfunction!(effective_phase_noise_uncertainty, m)?)?;
    m.add_function(wrap_pyfunction!(psd_uncertainty_from_dbc, m)?)?;
    m.add_function(wrap_pyfunction!(ssb_to_dsb, m)?)?;
    m.add_function(wrap_pyfunction!(dsb_to_ssb, m)?)?;
    m.add_function(wrap_pyfunction!(bunch_length_m_to_rad, m)?)?;
    m.add_function(wrap_pyfunction!(bunch_length_rad_to_m, m)?)?;
    m.add_function(wrap_pyfunction!(bunch_length_m_to_time, m)?)?;
    m.add_function(wrap_pyfunction!(bunch_length_time_to_m, m)?)?;
    m.add_function(wrap_pyfunction!(closed_orbit_kick, m)?)?;
    m.add_function(wrap_pyfunction!(cc_momentum_kick, m)?)?;
    Ok(())
}
