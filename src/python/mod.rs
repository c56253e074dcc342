//! Python bindings for the TUV invoker
//!
//! Rates are returned to Python as plain `dict[str, float]`. A call that had
//! to build the binary first returns `None`.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use rtuv_core::errors::TuvError;
use rtuv_core::rates::{RateSource, PHOTOLYSIS_INDEX_TABLE};
use rtuv_core::{
    decode_report as decode_raw_report, FloatValue, InvocationParameters, PhotolysisKey,
    PhotolysisRates, RawReport, TuvConfig, TuvOutcome, TuvRunner,
};
use std::collections::HashMap;
use std::path::PathBuf;

fn to_py_err(err: TuvError) -> PyErr {
    match err {
        TuvError::MalformedReport(_) | TuvError::Config(_) | TuvError::UnknownKey(_) => {
            PyValueError::new_err(err.to_string())
        }
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

fn rates_to_py<'py>(py: Python<'py>, rates: &PhotolysisRates) -> PyResult<Bound<'py, PyAny>> {
    Ok(pythonize::pythonize(py, rates)?)
}

fn outcome_to_py<'py>(
    py: Python<'py>,
    outcome: TuvOutcome,
) -> PyResult<Option<Bound<'py, PyAny>>> {
    match outcome {
        TuvOutcome::Ready(rates) => Ok(Some(rates_to_py(py, &rates)?)),
        TuvOutcome::BuildTriggered => Ok(None),
    }
}

/// Python wrapper for TuvRunner
///
/// Example:
///     runner = TuvRunner("/opt/tuv/V5.3.2", {"build_command": ["make", "-j4"]})
///     rates = runner.run(60.0, 0.0, 298.0)
///     if rates is None:
///         rates = runner.run(60.0, 0.0, 298.0)
#[pyclass(name = "TuvRunner", module = "rtuv")]
pub struct PyTuvRunner(pub TuvRunner);

#[pymethods]
impl PyTuvRunner {
    /// Create a runner for the installation at `root`
    ///
    /// `config` may override any of `executable`, `build_command` and `layout`.
    #[new]
    #[pyo3(signature = (root, config=None))]
    fn new(root: PathBuf, config: Option<Bound<'_, PyAny>>) -> PyResult<Self> {
        let mut config = match config {
            Some(config) => pythonize::depythonize::<TuvConfig>(&config)
                .map_err(|e| PyValueError::new_err(format!("{}", e)))?,
            None => TuvConfig::default(),
        };
        config.root = root;
        TuvRunner::new(config).map(Self).map_err(to_py_err)
    }

    /// Create a runner from a TOML configuration file
    #[staticmethod]
    fn from_toml(path: PathBuf) -> PyResult<Self> {
        let config = TuvConfig::from_file(path).map_err(to_py_err)?;
        TuvRunner::new(config).map(Self).map_err(to_py_err)
    }

    #[getter]
    fn root(&self) -> PathBuf {
        self.0.config().root.clone()
    }

    /// Whether the compiled binary is present
    #[getter]
    fn is_built(&self) -> bool {
        self.0.is_built()
    }

    /// Run the build command unconditionally
    fn build(&self, py: Python<'_>) -> PyResult<()> {
        py.allow_threads(|| self.0.build()).map_err(to_py_err)
    }

    /// Run TUV and return the photolysis rates, or None if a build was triggered
    fn run<'py>(
        &self,
        py: Python<'py>,
        zenith_angle: FloatValue,
        altitude: FloatValue,
        temperature: FloatValue,
    ) -> PyResult<Option<Bound<'py, PyAny>>> {
        let parameters = InvocationParameters::new(zenith_angle, altitude, temperature);
        let outcome = py
            .allow_threads(|| self.0.run(&parameters))
            .map_err(to_py_err)?;
        outcome_to_py(py, outcome)
    }

    fn __repr__(&self) -> String {
        format!("TuvRunner(root={:?})", self.0.config().root)
    }
}

/// Run TUV with the default configuration
///
/// Args:
///     zenith_angle: solar zenith angle [deg]
///     height: altitude [km]
///     temperature: temperature [K]
///     root_path: directory containing the TUV sources
///
/// Returns a dict of photolysis rates, or None if TUV had to be compiled
/// first, in which case call again.
#[pyfunction]
#[pyo3(signature = (zenith_angle, height, temperature, root_path))]
fn tuv_cli<'py>(
    py: Python<'py>,
    zenith_angle: FloatValue,
    height: FloatValue,
    temperature: FloatValue,
    root_path: PathBuf,
) -> PyResult<Option<Bound<'py, PyAny>>> {
    let rates = py
        .allow_threads(|| rtuv_core::tuv_cli(zenith_angle, height, temperature, root_path))
        .map_err(to_py_err)?;
    match rates {
        Some(rates) => Ok(Some(rates_to_py(py, &rates)?)),
        None => Ok(None),
    }
}

/// Decode the photolysis rates from captured TUV standard output
#[pyfunction]
fn decode_report<'py>(py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyAny>> {
    let rates = decode_raw_report(&RawReport::from_stdout(text), &Default::default())
        .map_err(to_py_err)?;
    rates_to_py(py, &rates)
}

/// Reaction pair position for each key; None for constant keys
#[pyfunction]
fn photolysis_index_table() -> HashMap<String, Option<usize>> {
    PHOTOLYSIS_INDEX_TABLE
        .iter()
        .map(|(key, source)| {
            let index = match source {
                RateSource::Reaction(index) => Some(*index),
                RateSource::Constant(_) => None,
            };
            (key.as_str().to_string(), index)
        })
        .collect()
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTuvRunner>()?;
    m.add_function(wrap_pyfunction!(tuv_cli, m)?)?;
    m.add_function(wrap_pyfunction!(decode_report, m)?)?;
    m.add_function(wrap_pyfunction!(photolysis_index_table, m)?)?;
    let keys: Vec<&'static str> = PhotolysisKey::all().map(PhotolysisKey::as_str).collect();
    m.add("PHOTOLYSIS_KEYS", keys)?;
    Ok(())
}
