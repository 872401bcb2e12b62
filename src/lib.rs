//! # bioproc-spc
//!
//! Statistical process control (SPC) and process capability evaluation for
//! batch-indexed manufacturing data.
//!
//! The engine takes an ordered series of per-batch measurements and, where
//! available, specification limits, and returns plain data: control limits,
//! out-of-control batches, and a capability verdict. It performs no I/O and
//! holds no state, so every entry point is safe to call concurrently.
//!
//! ## Modules
//!
//! - [`series`] — Batch-indexed [`MeasurementSeries`] and the [`MeasurementSource`] seam
//! - [`spc`] — Individuals control chart limits and out-of-control detection
//! - [`capability`] — Overall-variation capability index (Ppk-style) and classification
//! - [`correlation`] — Pearson correlation and correlation matrices across parameters
//! - [`config`] — Specification-limit tables (TOML)
//! - [`report`] — Per-parameter evaluation combining the above
//!
//! ## Conventions
//!
//! - Standard deviation is always the sample form (denominator `n − 1`).
//! - Moments come from `u_numflow::stats` (Kahan mean, Welford variance):
//!   the same input always gives bit-identical output.
//! - Zero variance gives an infinite capability index, not an error.
//! - A statistic that overflows `f64` is an error, never a silent NaN.
//!
//! ## Example
//!
//! ```
//! use bioproc_spc::{capability, spc, CapabilityClass, MeasurementSeries, SpecificationLimits};
//!
//! let series = MeasurementSeries::from_pairs([
//!     ("B0100", 15.1), ("B0101", 15.3), ("B0102", 15.0),
//!     ("B0103", 15.2), ("B0104", 15.4), ("B0105", 15.1),
//! ]).unwrap();
//!
//! let limits = spc::compute_control_limits(&series).unwrap();
//! assert_eq!(spc::find_out_of_control_points(&series, &limits).count(), 0);
//!
//! let spec = SpecificationLimits::new(14.0, 16.5).unwrap();
//! let cap = capability::compute_capability(&series, &spec).unwrap();
//! assert_eq!(cap.classification, CapabilityClass::Capable);
//! ```

pub mod capability;
pub mod config;
pub mod correlation;
pub mod error;
pub mod report;
pub mod series;
pub mod spc;

pub use capability::{CapabilityClass, CapabilityResult, SpecificationLimits};
pub use config::{SpecLimitSource, SpecLimitTable};
pub use error::{Result, SpcError};
pub use series::{InMemorySource, MeasurementSeries, MeasurementSource, Observation};
pub use spc::{ControlLimits, OutOfControlPoint};
