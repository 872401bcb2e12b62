//! Pearson correlation between batch-aligned measurement series.
//!
//! Used to link input attributes (CMAs, CPPs) to outputs (CQAs): series are
//! paired by position, so observation *i* of each series must describe the
//! same batch.
//!
//! # References
//!
//! Pearson (1895). "Note on regression and inheritance in the case of
//! two parents". Proceedings of the Royal Society of London, 58, 240–242.

use serde::Serialize;
use tracing::debug;

use crate::error::{finite, Result, SpcError};
use crate::series::MeasurementSeries;
use u_numflow::stats;

/// Minimum paired observations for a correlation coefficient.
pub const MIN_OBSERVATIONS: usize = 3;

/// Computes the Pearson product-moment correlation coefficient.
///
/// # Algorithm
///
/// r = cov(x,y) / (s_x · s_y), clamped into [-1, 1].
///
/// # Errors
///
/// - [`SpcError::LengthMismatch`] if the series differ in length
/// - [`SpcError::InsufficientData`] if fewer than 3 paired observations
/// - [`SpcError::ZeroVariance`] if either series is constant
/// - [`SpcError::NumericOverflow`] if a moment does not fit in an `f64`
///
/// # Examples
///
/// ```
/// use bioproc_spc::{correlation::pearson, MeasurementSeries};
///
/// let age = MeasurementSeries::from_values("B", &[10.0, 20.0, 30.0, 40.0]).unwrap();
/// let purity = MeasurementSeries::from_values("B", &[99.0, 98.6, 98.1, 97.7]).unwrap();
/// let r = pearson(&age, &purity).unwrap();
/// assert!(r < -0.99);
/// ```
pub fn pearson(x: &MeasurementSeries, y: &MeasurementSeries) -> Result<f64> {
    pearson_named(("x", x), ("y", y))
}

fn pearson_named(
    (x_name, x): (&str, &MeasurementSeries),
    (y_name, y): (&str, &MeasurementSeries),
) -> Result<f64> {
    if x.len() != y.len() {
        return Err(SpcError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    x.require(MIN_OBSERVATIONS)?;

    let xv = x.values();
    let yv = y.values();
    let sx = finite(stats::std_dev(&xv), "std_dev")?;
    let sy = finite(stats::std_dev(&yv), "std_dev")?;
    if sx == 0.0 {
        return Err(SpcError::ZeroVariance {
            name: x_name.to_string(),
        });
    }
    if sy == 0.0 {
        return Err(SpcError::ZeroVariance {
            name: y_name.to_string(),
        });
    }
    let cov = finite(stats::covariance(&xv, &yv), "covariance")?;
    let r = cov / (sx * sy);
    if r.is_nan() {
        return Err(SpcError::overflow("correlation"));
    }
    Ok(r.clamp(-1.0, 1.0))
}

/// Symmetric matrix of pairwise Pearson coefficients with unit diagonal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    /// Row-major, `names.len()²` entries.
    data: Vec<f64>,
}

impl CorrelationMatrix {
    /// Computes all pairwise correlations between named series.
    ///
    /// # Errors
    ///
    /// Any error from [`pearson`] for any pair. A single series only needs
    /// at least 3 observations.
    ///
    /// # Examples
    ///
    /// ```
    /// use bioproc_spc::{correlation::CorrelationMatrix, MeasurementSeries};
    ///
    /// let x = MeasurementSeries::from_values("B", &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// let y = MeasurementSeries::from_values("B", &[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
    /// let z = MeasurementSeries::from_values("B", &[5.0, 4.0, 3.0, 2.0, 1.0]).unwrap();
    /// let mat = CorrelationMatrix::compute(&[("x", &x), ("y", &y), ("z", &z)]).unwrap();
    /// assert!((mat.get("x", "y").unwrap() - 1.0).abs() < 1e-10);
    /// assert!((mat.get("x", "z").unwrap() + 1.0).abs() < 1e-10);
    /// ```
    pub fn compute(variables: &[(&str, &MeasurementSeries)]) -> Result<Self> {
        let p = variables.len();
        let mut data = vec![0.0; p * p];

        for i in 0..p {
            variables[i].1.require(MIN_OBSERVATIONS)?;
            data[i * p + i] = 1.0;
            for j in (i + 1)..p {
                let r = pearson_named(variables[i], variables[j])?;
                data[i * p + j] = r;
                data[j * p + i] = r;
            }
        }

        debug!(variables = p, "correlation matrix computed");
        Ok(Self {
            names: variables.iter().map(|(n, _)| n.to_string()).collect(),
            data,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Coefficient at row `i`, column `j`, or `None` if out of range.
    pub fn at(&self, i: usize, j: usize) -> Option<f64> {
        let p = self.len();
        if i >= p || j >= p {
            return None;
        }
        self.data.get(i * p + j).copied()
    }

    /// Coefficient between two series by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        self.at(i, j)
    }

    /// The other series with the largest |r| against `name`.
    pub fn strongest_with(&self, name: &str) -> Option<(&str, f64)> {
        let i = self.position(name)?;
        (0..self.len())
            .filter(|&j| j != i)
            .filter_map(|j| Some((self.names[j].as_str(), self.at(i, j)?)))
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}
