// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Python bindings for PII Guard
// Built with PyO3 for hosts that drive page scanning from Python

// Allow non-local definitions for PyO3 macros
#![allow(non_local_definitions)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyModule};

use crate::pii_guard::aggregate::AggregatedFinding;
use crate::pii_guard::config::{DetectorConfig, PiiType};
use crate::pii_guard::detector::PiiDetector;
use crate::pii_guard::highlight;
use crate::pii_guard::masking;
use crate::pii_guard::report::{PiiReport, DEFAULT_MAX_EXAMPLES};

/// PII detector exposed to Python
///
/// # Example (Python)
/// ```python
/// from pii_guard import PiiGuard
///
/// guard = PiiGuard({"email": True, "ssn": True})
/// findings = guard.detect("SSN: 123-45-6789")
/// print(findings)  # [{"type": "ssn", "count": 1, "matches": ["123-45-6789"]}]
///
/// print(guard.mask("123-45-6789", "ssn"))  # "XXX-XX-6789"
/// ```
#[pyclass]
pub struct PiiGuard {
    detector: PiiDetector,
}

#[pymethods]
impl PiiGuard {
    /// Create a detector from the stored settings dict
    ///
    /// `None` enables every type; otherwise keys are read with Python
    /// truthiness and absent keys are disabled.
    #[new]
    #[pyo3(signature = (config=None))]
    pub fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let config = match config {
            Some(dict) => config_from_py_dict(dict)?,
            None => DetectorConfig::default(),
        };
        Ok(Self {
            detector: PiiDetector::new(config),
        })
    }

    /// Detect PII in text, one dict per category in first-seen order
    pub fn detect<'py>(&self, py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyList>> {
        let findings = self.detector.detect(text);
        findings_to_py(py, &findings)
    }

    /// Mask one raw value for display
    pub fn mask(&self, value: &str, pii_type: &str) -> PyResult<String> {
        let pii_type = parse_pii_type(pii_type)?;
        Ok(masking::mask(value, pii_type))
    }

    /// Wrap findings in highlight spans inside `markup`
    pub fn highlight(&self, markup: &str, findings: &Bound<'_, PyAny>) -> PyResult<String> {
        let findings = findings_from_py(findings)?;
        Ok(highlight::highlight(markup, &findings).into_owned())
    }

    /// JSON report with masked examples
    #[pyo3(signature = (findings, max_examples=DEFAULT_MAX_EXAMPLES))]
    pub fn report(&self, findings: &Bound<'_, PyAny>, max_examples: usize) -> PyResult<String> {
        let findings = findings_from_py(findings)?;
        PiiReport::from_findings(&findings, max_examples)
            .to_json()
            .map_err(|e| PyValueError::new_err(format!("Report serialization failed: {}", e)))
    }
}

fn config_from_py_dict(dict: &Bound<'_, PyDict>) -> PyResult<DetectorConfig> {
    let mut config = DetectorConfig::none();
    for pii_type in PiiType::ALL {
        if let Some(value) = dict.get_item(pii_type.as_str())? {
            config = config.with(pii_type, value.is_truthy()?);
        }
    }
    Ok(config)
}

fn parse_pii_type(s: &str) -> PyResult<PiiType> {
    s.parse::<PiiType>()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

fn findings_to_py<'py>(
    py: Python<'py>,
    findings: &[AggregatedFinding],
) -> PyResult<Bound<'py, PyList>> {
    let py_list = PyList::empty(py);
    for finding in findings {
        let item = PyDict::new(py);
        item.set_item("type", finding.pii_type.as_str())?;
        item.set_item("count", finding.count)?;
        item.set_item("matches", finding.matches.clone())?;
        py_list.append(item)?;
    }
    Ok(py_list)
}

fn findings_from_py(findings: &Bound<'_, PyAny>) -> PyResult<Vec<AggregatedFinding>> {
    let mut result = Vec::new();
    for item in findings.try_iter()? {
        let item = item?;
        let type_str: String = item.get_item("type")?.extract()?;
        let matches: Vec<String> = item.get_item("matches")?.extract()?;
        result.push(AggregatedFinding {
            pii_type: parse_pii_type(&type_str)?,
            count: matches.len(),
            matches,
        });
    }
    Ok(result)
}

/// Python module: pii_guard
#[pymodule]
#[pyo3(name = "pii_guard")]
fn pii_guard_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PiiGuard>()?;

    // Module metadata
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("SETTINGS_KEY", crate::pii_guard::config::SETTINGS_KEY)?;

    Ok(())
}
