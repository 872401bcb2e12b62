//! Error taxonomy for the evaluation engine.
//!
//! Every error is raised at the call boundary before any computation runs.
//! Zero variance is not an error: it yields an infinite capability index
//! (see [`crate::capability::CapabilityResult::is_degenerate`]).

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpcError>;

#[derive(Debug, Error)]
pub enum SpcError {
    /// Too few observations for the requested statistic.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Specification limits are inverted, non-finite, or absent.
    #[error("invalid specification: {reason}")]
    InvalidSpecification { reason: String },

    #[error("duplicate batch identifier: {id}")]
    DuplicateIdentifier { id: String },

    #[error("non-finite value for batch {id}")]
    NonFiniteValue { id: String },

    #[error("series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Pearson r is undefined when one side is constant.
    #[error("zero variance in series {name}")]
    ZeroVariance { name: String },

    /// A statistic overflowed `f64` even though every input was finite.
    #[error("numeric overflow computing {quantity}")]
    NumericOverflow { quantity: &'static str },

    #[error("unknown parameter: {name}")]
    UnknownParameter { name: String },

    #[error("config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("config serialize: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl SpcError {
    pub fn insufficient(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    pub fn overflow(quantity: &'static str) -> Self {
        Self::NumericOverflow { quantity }
    }

    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpecification {
            reason: reason.into(),
        }
    }
}

/// Checks a statistic computed over a length-checked, all-finite series.
/// `None` or a non-finite value there can only come from `f64` overflow.
pub(crate) fn finite(value: Option<f64>, quantity: &'static str) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(SpcError::overflow(quantity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message_names_counts() {
        let err = SpcError::insufficient(2, 1);
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 2 observations, got 1"
        );
    }

    #[test]
    fn invalid_spec_carries_reason() {
        let err = SpcError::invalid_spec("lower limit 5 exceeds upper limit 1");
        assert!(matches!(err, SpcError::InvalidSpecification { .. }));
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn overflow_names_quantity() {
        assert_eq!(
            SpcError::overflow("std_dev").to_string(),
            "numeric overflow computing std_dev"
        );
    }

    #[test]
    fn finite_rejects_none_and_infinite() {
        assert_eq!(finite(Some(1.5), "mean").unwrap(), 1.5);
        assert!(matches!(finite(None, "mean"), Err(SpcError::NumericOverflow { quantity: "mean" })));
        assert!(matches!(
            finite(Some(f64::NAN), "std_dev"),
            Err(SpcError::NumericOverflow { quantity: "std_dev" })
        ));
    }

    #[test]
    fn toml_errors_convert() {
        let parse: std::result::Result<toml::Value, _> = "= broken".parse::<toml::Value>();
        let err: SpcError = parse.unwrap_err().into();
        assert!(matches!(err, SpcError::Config(_)));
    }
}
