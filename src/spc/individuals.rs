//! Individuals (I) chart: one observation per batch, no rational subgrouping.
//!
//! Limits come straight from the overall spread of the individual values:
//! `mean ± 3s`, with `s` the sample standard deviation. This differs from the
//! moving-range I-MR estimate (`MR̄ / d2`); a single extreme point inflates
//! `s` and can therefore sit inside its own limits.

use tracing::trace;

use super::chart::{ControlLimits, OutOfControlPoint};
use crate::error::{finite, Result, SpcError};
use crate::series::{MeasurementSeries, Observation};
use u_numflow::stats;

/// Computes the center line and ±3σ limits of `series`.
///
/// # Errors
///
/// - [`crate::SpcError::InsufficientData`] if the series has fewer than 2
///   observations
/// - [`crate::SpcError::NumericOverflow`] if the mean, σ, or a limit does not
///   fit in an `f64`
///
/// # Examples
///
/// ```
/// use bioproc_spc::{spc, MeasurementSeries};
///
/// let series = MeasurementSeries::from_values("B", &[10.0, 12.0, 11.0, 13.0, 9.0]).unwrap();
/// let limits = spc::compute_control_limits(&series).unwrap();
/// assert!((limits.mean - 11.0).abs() < 1e-12);
/// assert!(limits.ucl > limits.mean && limits.lcl < limits.mean);
/// ```
pub fn compute_control_limits(series: &MeasurementSeries) -> Result<ControlLimits> {
    series.require(2)?;
    let values = series.values();
    let mean = finite(stats::mean(&values), "mean")?;
    let std_dev = finite(stats::std_dev(&values), "std_dev")?;
    let limits = ControlLimits::from_mean_and_sigma(mean, std_dev);
    if !limits.ucl.is_finite() || !limits.lcl.is_finite() {
        return Err(SpcError::overflow("control limits"));
    }
    trace!(
        n = series.len(),
        mean,
        std_dev,
        ucl = limits.ucl,
        lcl = limits.lcl,
        "control limits computed"
    );
    Ok(limits)
}

/// Lazily yields the observations of `series` that fall strictly outside
/// `limits`, in series order.
///
/// `limits` are taken as given and not re-derived, so they may come from a
/// reference period rather than `series` itself.
///
/// Only the beyond-limits test is applied. Pattern rules (runs, trends,
/// zone tests in the Western Electric or Nelson style) are not evaluated
/// here and must be layered on top by the caller.
///
/// # Examples
///
/// ```
/// use bioproc_spc::{spc, spc::ControlLimits, MeasurementSeries};
///
/// let series = MeasurementSeries::from_pairs([("B1", 15.1), ("B2", 17.5), ("B3", 15.3)]).unwrap();
/// let limits = ControlLimits::from_mean_and_sigma(15.2, 0.5);
/// let ooc: Vec<_> = spc::find_out_of_control_points(&series, &limits).collect();
/// assert_eq!(ooc.len(), 1);
/// assert_eq!(ooc[0].id, "B2");
/// ```
pub fn find_out_of_control_points<'a>(
    series: &'a MeasurementSeries,
    limits: &ControlLimits,
) -> OutOfControlPoints<'a> {
    OutOfControlPoints {
        inner: series.observations().iter().enumerate(),
        limits: *limits,
    }
}

/// Iterator returned by [`find_out_of_control_points`].
#[derive(Debug, Clone)]
pub struct OutOfControlPoints<'a> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Observation>>,
    limits: ControlLimits,
}

impl Iterator for OutOfControlPoints<'_> {
    type Item = OutOfControlPoint;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, obs) in self.inner.by_ref() {
            if let Some(side) = self.limits.classify(obs.value) {
                return Some(OutOfControlPoint {
                    id: obs.id.clone(),
                    value: obs.value,
                    index,
                    side,
                });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl std::iter::FusedIterator for OutOfControlPoints<'_> {}
