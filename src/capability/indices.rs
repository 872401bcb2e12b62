//! Process performance index (Ppk-style) over overall variation.
//!
//! The series carries no subgroup structure, so only the overall-variation
//! form is available: σ is the sample standard deviation of every
//! observation, and the index is
//!
//! ```text
//! Ppu   = (USL − μ) / 3σ
//! Ppl   = (μ − LSL) / 3σ
//! index = min(Ppu, Ppl)
//! ```
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 8.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality Technology*
//!   18(1), pp. 41--52.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{finite, Result, SpcError};
use crate::series::MeasurementSeries;
use u_numflow::stats;

/// Indices below this value classify as [`CapabilityClass::NotCapable`].
pub const CAPABLE_MIN_MARGINAL: f64 = 1.0;
/// Indices at or above this value classify as [`CapabilityClass::Capable`].
pub const CAPABLE_MIN: f64 = 1.33;

/// Two-sided specification window `[lower, upper]`.
///
/// `lower == upper` is accepted; `lower > upper` is not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecificationLimits {
    /// Lower specification limit (LSL).
    pub lower: f64,
    /// Upper specification limit (USL).
    pub upper: f64,
}

impl SpecificationLimits {
    /// Creates validated specification limits.
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidSpecification`] if either limit is non-finite or
    /// `lower > upper`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bioproc_spc::SpecificationLimits;
    ///
    /// assert!(SpecificationLimits::new(97.5, 100.0).is_ok());
    /// assert!(SpecificationLimits::new(100.0, 97.5).is_err());
    /// ```
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        let limits = Self { lower, upper };
        limits.validate()?;
        Ok(limits)
    }

    /// Checks the invariants of a possibly hand-built value.
    pub fn validate(&self) -> Result<()> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(SpcError::invalid_spec(format!(
                "limits must be finite (lower={}, upper={})",
                self.lower, self.upper
            )));
        }
        if self.lower > self.upper {
            return Err(SpcError::invalid_spec(format!(
                "lower limit {} exceeds upper limit {}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }

    /// Width of the specification window, `upper − lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Capability verdict for a computed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapabilityClass {
    /// `index < 1.0`
    NotCapable,
    /// `1.0 <= index < 1.33`
    Marginal,
    /// `index >= 1.33`, including the infinite zero-variance index.
    Capable,
}

impl CapabilityClass {
    /// Classifies an index against the fixed thresholds.
    pub fn from_index(index: f64) -> Self {
        if index >= CAPABLE_MIN {
            Self::Capable
        } else if index >= CAPABLE_MIN_MARGINAL {
            Self::Marginal
        } else {
            Self::NotCapable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotCapable => "NOT CAPABLE",
            Self::Marginal => "MARGINALLY CAPABLE",
            Self::Capable => "CAPABLE",
        }
    }
}

impl std::fmt::Display for CapabilityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of a capability computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapabilityResult {
    /// `min(upper_index, lower_index)`; `+∞` when `std_dev == 0`.
    pub index: f64,
    pub classification: CapabilityClass,
    /// Ppu = (USL − μ) / 3σ; `+∞` when `std_dev == 0`.
    pub upper_index: f64,
    /// Ppl = (μ − LSL) / 3σ; `+∞` when `std_dev == 0`.
    pub lower_index: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub spec: SpecificationLimits,
}

impl CapabilityResult {
    /// Returns `true` for the zero-variance sentinel (infinite index).
    pub fn is_degenerate(&self) -> bool {
        self.std_dev == 0.0
    }
}

/// Computes the overall-variation capability index of `series` against
/// `spec`.
///
/// A series whose values are all identical has `σ = 0`; this is a valid
/// outcome, reported as `index = +∞` and [`CapabilityClass::Capable`]
/// regardless of where the constant value sits.
///
/// # Errors
///
/// - [`SpcError::InsufficientData`] if the series has fewer than 2 observations
/// - [`SpcError::InvalidSpecification`] if `spec` is inverted or non-finite
/// - [`SpcError::NumericOverflow`] if the mean, σ, or the index does not fit
///   in an `f64`
///
/// # Examples
///
/// ```
/// use bioproc_spc::{capability, CapabilityClass, MeasurementSeries, SpecificationLimits};
///
/// let series = MeasurementSeries::from_values("B", &[9.8, 10.0, 10.2, 10.0, 9.9, 10.1]).unwrap();
/// let spec = SpecificationLimits::new(9.0, 11.0).unwrap();
/// let result = capability::compute_capability(&series, &spec).unwrap();
/// assert_eq!(result.classification, CapabilityClass::Capable);
/// ```
pub fn compute_capability(
    series: &MeasurementSeries,
    spec: &SpecificationLimits,
) -> Result<CapabilityResult> {
    series.require(2)?;
    spec.validate()?;

    let values = series.values();
    let mean = finite(stats::mean(&values), "mean")?;
    let std_dev = finite(stats::std_dev(&values), "std_dev")?;

    let (upper_index, lower_index) = if std_dev == 0.0 {
        (f64::INFINITY, f64::INFINITY)
    } else {
        let three_sigma = finite(Some(3.0 * std_dev), "3 sigma")?;
        (
            (spec.upper - mean) / three_sigma,
            (mean - spec.lower) / three_sigma,
        )
    };
    let index = upper_index.min(lower_index);
    if index.is_nan() {
        return Err(SpcError::overflow("capability index"));
    }
    let classification = CapabilityClass::from_index(index);

    trace!(
        n = series.len(),
        mean,
        std_dev,
        index,
        %classification,
        "capability computed"
    );

    Ok(CapabilityResult {
        index,
        classification,
        upper_index,
        lower_index,
        mean,
        std_dev,
        spec: *spec,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn series(values: &[f64]) -> MeasurementSeries {
        MeasurementSeries::from_values("B", values).unwrap()
    }

    // -----------------------------------------------------------------------
    // Specification limits
    // -----------------------------------------------------------------------

    #[test]
    fn spec_rejects_inverted() {
        assert!(matches!(
            SpecificationLimits::new(5.0, 1.0),
            Err(SpcError::InvalidSpecification { .. })
        ));
    }

    #[test]
    fn spec_accepts_equal_limits() {
        let spec = SpecificationLimits::new(6.5, 6.5).unwrap();
        assert_eq!(spec.width(), 0.0);
    }

    #[test]
    fn spec_rejects_non_finite() {
        assert!(SpecificationLimits::new(f64::NAN, 1.0).is_err());
        assert!(SpecificationLimits::new(0.0, f64::INFINITY).is_err());
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    #[test]
    fn classification_thresholds() {
        assert_eq!(CapabilityClass::from_index(-0.5), CapabilityClass::NotCapable);
        assert_eq!(CapabilityClass::from_index(0.999), CapabilityClass::NotCapable);
        assert_eq!(CapabilityClass::from_index(1.0), CapabilityClass::Marginal);
        assert_eq!(CapabilityClass::from_index(1.329), CapabilityClass::Marginal);
        assert_eq!(CapabilityClass::from_index(1.33), CapabilityClass::Capable);
        assert_eq!(CapabilityClass::from_index(f64::INFINITY), CapabilityClass::Capable);
    }

    #[test]
    fn class_labels() {
        assert_eq!(CapabilityClass::Marginal.to_string(), "MARGINALLY CAPABLE");
        assert_eq!(CapabilityClass::NotCapable.label(), "NOT CAPABLE");
    }

    // -----------------------------------------------------------------------
    // Computation
    // -----------------------------------------------------------------------

    #[test]
    fn rejects_short_series() {
        let spec = SpecificationLimits::new(0.0, 10.0).unwrap();
        assert!(matches!(
            compute_capability(&MeasurementSeries::new(), &spec),
            Err(SpcError::InsufficientData { actual: 0, .. })
        ));
        assert!(matches!(
            compute_capability(&series(&[5.0]), &spec),
            Err(SpcError::InsufficientData { actual: 1, .. })
        ));
    }

    #[test]
    fn rejects_hand_built_inverted_spec() {
        let spec = SpecificationLimits {
            lower: 10.0,
            upper: 0.0,
        };
        assert!(matches!(
            compute_capability(&series(&[4.0, 5.0, 6.0]), &spec),
            Err(SpcError::InvalidSpecification { .. })
        ));
    }

    /// mean 5, s = 1 → Ppu = (10 − 5)/3 = 1.6667, Ppl = (5 − 2)/3 = 1.0
    #[test]
    fn exact_numerical_verification() {
        let s = series(&[4.0, 5.0, 6.0]);
        let spec = SpecificationLimits::new(2.0, 10.0).unwrap();
        let r = compute_capability(&s, &spec).unwrap();
        assert!((r.mean - 5.0).abs() < 1e-15);
        assert!((r.std_dev - 1.0).abs() < 1e-15);
        assert!((r.upper_index - 5.0 / 3.0).abs() < 1e-12);
        assert!((r.lower_index - 1.0).abs() < 1e-12);
        assert!((r.index - 1.0).abs() < 1e-12);
        assert_eq!(r.classification, CapabilityClass::Marginal);
        assert!(!r.is_degenerate());
    }

    #[test]
    fn off_center_process_not_capable() {
        let s = series(&[97.8, 97.6, 98.0, 97.7, 97.9, 97.8]);
        let spec = SpecificationLimits::new(97.5, 100.0).unwrap();
        let r = compute_capability(&s, &spec).unwrap();
        assert!(r.lower_index < r.upper_index);
        assert!((r.index - r.lower_index).abs() < 1e-15);
        assert_eq!(r.classification, CapabilityClass::NotCapable);
    }

    #[test]
    fn huge_values_overflow_instead_of_nan() {
        let spec = SpecificationLimits::new(0.0, 10.0).unwrap();
        for values in [[1.7e308, 1.7e308, 1.0], [1e200, -1e200, 0.0]] {
            let err = compute_capability(&series(&values), &spec).unwrap_err();
            assert!(matches!(err, SpcError::NumericOverflow { .. }), "{err:?}");
        }
    }

    #[test]
    fn mean_outside_spec_gives_negative_index() {
        let s = series(&[12.0, 12.5, 11.5]);
        let spec = SpecificationLimits::new(0.0, 10.0).unwrap();
        let r = compute_capability(&s, &spec).unwrap();
        assert!(r.index < 0.0);
        assert_eq!(r.classification, CapabilityClass::NotCapable);
    }

    #[test]
    fn zero_variance_is_infinite_and_capable() {
        let s = series(&[6.5; 12]);
        let spec = SpecificationLimits::new(6.4, 6.6).unwrap();
        let r = compute_capability(&s, &spec).unwrap();
        assert_eq!(r.std_dev, 0.0);
        assert!(r.index.is_infinite() && r.index > 0.0);
        assert_eq!(r.classification, CapabilityClass::Capable);
        assert!(r.is_degenerate());
    }

    /// 50 values linearly spaced over [1, 200] against spec (0, 250).
    #[test]
    fn linear_drift_matches_formula() {
        let values: Vec<f64> = (0..50).map(|i| 1.0 + 199.0 * i as f64 / 49.0).collect();
        let s = series(&values);
        let spec = SpecificationLimits::new(0.0, 250.0).unwrap();
        let r = compute_capability(&s, &spec).unwrap();

        let mean = values.iter().sum::<f64>() / 50.0;
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        let sd = (ss / 49.0).sqrt();
        let expected = ((250.0 - mean) / (3.0 * sd)).min((mean - 0.0) / (3.0 * sd));

        assert!(r.index.is_finite());
        assert!((r.index - expected).abs() < 1e-9, "{} vs {}", r.index, expected);
        // Uniform spread over most of the window: far from capable.
        assert_eq!(r.classification, CapabilityClass::from_index(expected));
        assert_eq!(r.classification, CapabilityClass::NotCapable);
    }

    proptest! {
        #[test]
        fn widening_spec_never_decreases_index(
            values in proptest::collection::vec(-100.0_f64..100.0, 2..=40),
            lower in -500.0_f64..0.0,
            width in 0.0_f64..500.0,
            extra_low in 0.0_f64..100.0,
            extra_high in 0.0_f64..100.0,
        ) {
            let s = series(&values);
            let narrow = SpecificationLimits::new(lower, lower + width).unwrap();
            let wide = SpecificationLimits::new(lower - extra_low, lower + width + extra_high).unwrap();
            let a = compute_capability(&s, &narrow).unwrap();
            let b = compute_capability(&s, &wide).unwrap();
            prop_assert!(b.index >= a.index, "{} < {}", b.index, a.index);
        }

        #[test]
        fn identical_values_always_capable(v in -1e6_f64..1e6, n in 2_usize..50) {
            let s = series(&vec![v; n]);
            let spec = SpecificationLimits::new(v - 1.0, v + 1.0).unwrap();
            let r = compute_capability(&s, &spec).unwrap();
            prop_assert_eq!(r.std_dev, 0.0);
            prop_assert_eq!(r.index, f64::INFINITY);
            prop_assert_eq!(r.classification, CapabilityClass::Capable);
        }

        #[test]
        fn index_is_min_of_sides(
            values in proptest::collection::vec(0.0_f64..10.0, 3..=30),
        ) {
            let s = series(&values);
            let spec = SpecificationLimits::new(-5.0, 15.0).unwrap();
            let r = compute_capability(&s, &spec).unwrap();
            prop_assert_eq!(r.index, r.upper_index.min(r.lower_index));
        }
    }
}
