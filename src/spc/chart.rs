//! Control-limit and out-of-control point types.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use serde::Serialize;

/// Number of standard deviations between the center line and each limit.
pub const SIGMA_MULTIPLIER: f64 = 3.0;

/// Control limits for an Individuals chart.
///
/// # Invariants
///
/// - `ucl = mean + 3 * std_dev`
/// - `lcl = mean - 3 * std_dev`
/// - `std_dev >= 0`, so `lcl <= mean <= ucl`
///
/// The lower limit is not floored at zero, even for quantities that are
/// physically non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlLimits {
    /// Center line (process mean).
    pub mean: f64,
    /// Sample standard deviation (denominator `n − 1`).
    pub std_dev: f64,
    /// Upper control limit.
    pub ucl: f64,
    /// Lower control limit.
    pub lcl: f64,
}

impl ControlLimits {
    /// Derives symmetric ±3σ limits around `mean`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bioproc_spc::spc::ControlLimits;
    ///
    /// let limits = ControlLimits::from_mean_and_sigma(25.0, 2.0);
    /// assert_eq!(limits.ucl, 31.0);
    /// assert_eq!(limits.lcl, 19.0);
    /// ```
    pub fn from_mean_and_sigma(mean: f64, std_dev: f64) -> Self {
        let half_width = SIGMA_MULTIPLIER * std_dev;
        Self {
            mean,
            std_dev,
            ucl: mean + half_width,
            lcl: mean - half_width,
        }
    }

    /// Which limit `value` violates, if any. Values exactly on a limit are
    /// in control.
    pub fn classify(&self, value: f64) -> Option<LimitSide> {
        if value > self.ucl {
            Some(LimitSide::Above)
        } else if value < self.lcl {
            Some(LimitSide::Below)
        } else {
            None
        }
    }

    /// Returns `true` if `value` lies within `[lcl, ucl]`.
    pub fn contains(&self, value: f64) -> bool {
        self.classify(value).is_none()
    }
}

/// Which control limit a point falls outside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitSide {
    /// Strictly above the UCL.
    Above,
    /// Strictly below the LCL.
    Below,
}

/// An observation outside the control limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutOfControlPoint {
    /// Batch identifier.
    pub id: String,
    pub value: f64,
    /// Zero-based position in the source series.
    pub index: usize,
    pub side: LimitSide,
}
