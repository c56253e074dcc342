pub mod python;

use pyo3::prelude::*;

#[pymodule]
#[pyo3(name = "_lib")]
fn rtuv(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    python::register(m)
}
