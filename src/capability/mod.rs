//! Process capability against two-sided specification limits.
//!
//! - [`compute_capability`] — overall-variation index (Ppk-style) with a
//!   fixed three-way classification
//!
//! # Thresholds
//!
//! | Index | Class |
//! |-------|-------|
//! | < 1.0 | [`CapabilityClass::NotCapable`] |
//! | 1.0 ..< 1.33 | [`CapabilityClass::Marginal`] |
//! | >= 1.33 | [`CapabilityClass::Capable`] |
//!
//! The thresholds are constants, not per-call options; callers needing a
//! different policy classify [`CapabilityResult::index`] themselves.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod indices;

pub use indices::{
    compute_capability, CapabilityClass, CapabilityResult, SpecificationLimits, CAPABLE_MIN,
    CAPABLE_MIN_MARGINAL,
};
