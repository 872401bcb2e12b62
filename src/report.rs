//! Single-parameter evaluation: control chart plus capability.
//!
//! Bundles what a monitoring view shows for one parameter: the Individuals
//! chart limits, the batches outside them, and the capability verdict when
//! the parameter has specification limits.

use serde::Serialize;
use tracing::{debug, warn};

use crate::capability::{self, CapabilityClass, CapabilityResult, SpecificationLimits};
use crate::config::SpecLimitSource;
use crate::error::Result;
use crate::series::{MeasurementSeries, MeasurementSource};
use crate::spc::{self, ControlLimits, OutOfControlPoint};

/// Evaluation of one process parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterReport {
    pub parameter: String,
    pub observations: usize,
    pub limits: ControlLimits,
    pub out_of_control: Vec<OutOfControlPoint>,
    /// `None` when the parameter has no specification limits.
    pub capability: Option<CapabilityResult>,
}

impl ParameterReport {
    pub fn in_control(&self) -> bool {
        self.out_of_control.is_empty()
    }

    /// `true` if any batch is out of control, or if capability was computed
    /// and did not reach [`CapabilityClass::Capable`].
    pub fn needs_attention(&self) -> bool {
        !self.in_control()
            || self
                .capability
                .as_ref()
                .is_some_and(|c| c.classification != CapabilityClass::Capable)
    }
}

/// Evaluates `series` for `parameter`.
///
/// # Errors
///
/// - [`crate::SpcError::InsufficientData`] if the series has fewer than 2
///   observations
/// - [`crate::SpcError::InvalidSpecification`] if `spec` is present but invalid
///
/// # Examples
///
/// ```
/// use bioproc_spc::{report, MeasurementSeries, SpecificationLimits};
///
/// let series = MeasurementSeries::from_values("B", &[6.50, 6.51, 6.49, 6.50, 6.52, 6.48]).unwrap();
/// let spec = SpecificationLimits::new(6.4, 6.6).unwrap();
/// let r = report::evaluate_parameter("Elution Buffer pH", &series, Some(&spec)).unwrap();
/// assert!(r.in_control());
/// assert!(r.capability.is_some());
/// ```
pub fn evaluate_parameter(
    parameter: &str,
    series: &MeasurementSeries,
    spec: Option<&SpecificationLimits>,
) -> Result<ParameterReport> {
    let limits = spc::compute_control_limits(series)?;
    let out_of_control: Vec<_> = spc::find_out_of_control_points(series, &limits).collect();
    let capability = spec
        .map(|s| capability::compute_capability(series, s))
        .transpose()?;

    debug!(
        parameter,
        n = series.len(),
        ooc = out_of_control.len(),
        capability = ?capability.as_ref().map(|c| c.index),
        "parameter evaluated"
    );
    if !out_of_control.is_empty() {
        let ids: Vec<&str> = out_of_control.iter().map(|p| p.id.as_str()).collect();
        warn!(parameter, batches = ?ids, "out-of-control batches");
    }
    if let Some(c) = capability.as_ref() {
        if c.classification != CapabilityClass::Capable {
            warn!(parameter, index = c.index, class = %c.classification, "process not capable");
        }
    }

    Ok(ParameterReport {
        parameter: parameter.to_string(),
        observations: series.len(),
        limits,
        out_of_control,
        capability,
    })
}

/// Fetches `parameter` from `source`, looks up its limits in `specs`, and
/// evaluates it.
pub fn evaluate_from(
    parameter: &str,
    source: &dyn MeasurementSource,
    specs: &dyn SpecLimitSource,
) -> Result<ParameterReport> {
    let series = source.fetch(parameter)?;
    let spec = specs.spec_limits(parameter);
    evaluate_parameter(parameter, &series, spec.as_ref())
}
