//! Statistical Process Control for batch-indexed individual measurements.
//!
//! - [`compute_control_limits`] — center line and ±3σ limits of an
//!   Individuals chart (sample standard deviation, `n − 1`)
//! - [`find_out_of_control_points`] — observations strictly outside the limits
//!
//! # Limitations
//!
//! Only the beyond-limits test is applied. Run and trend rules (Western
//! Electric, Nelson) are not evaluated; callers needing them must apply
//! them to the series and limits returned here.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

mod chart;
mod individuals;

pub use chart::{ControlLimits, LimitSide, OutOfControlPoint, SIGMA_MULTIPLIER};
pub use individuals::{compute_control_limits, find_out_of_control_points, OutOfControlPoints};
